use mininghub_core::html::render_plan_page;
use mininghub_core::{PlanContent, RenderOptions};

const OPTIONS: RenderOptions = RenderOptions { year: 2025 };

#[test]
fn page_has_download_link_and_all_sections() {
    let content = PlanContent::mininghub();
    let page = render_plan_page(&content, &OPTIONS, "MiningHub-Investment-Plan.pdf");

    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains(r#"href="MiningHub-Investment-Plan.pdf" download>Download PDF</a>"#));
    for id in [
        "about",
        "explainer",
        "package",
        "referral",
        "team-rewards",
        "deposit-withdrawal",
        "income-calculator",
    ] {
        assert!(page.contains(&format!(r#"<section id="{}">"#, id)), "missing {}", id);
    }
    assert!(page.contains(&content.tagline));
    assert!(page.contains(&content.crypto_mining_explainer.how_it_works.points[5]));
    assert!(page.contains("&copy; 2025 MiningHub. All rights reserved."));
}

#[test]
fn calculator_figures_are_computed() {
    let content = PlanContent::mininghub();
    let page = render_plan_page(&content, &OPTIONS, "plan.pdf");
    assert!(page.contains("<strong>$18</strong>"));
    assert!(page.contains("मासिक कमाई: $18</p>"));
    assert!(page.contains("<strong>5%</strong>"));
    assert!(page.contains(r#"<td class="value">$700 प्रति माह</td>"#));
    assert_eq!(page.matches("<tr>").count(), content.team_rewards.len());
}

#[test]
fn content_is_escaped() {
    let mut content = PlanContent::mininghub();
    content.name = "Mining<Hub> & Co".to_string();
    content.services = vec!["<script>alert(1)</script>".to_string()];
    let page = render_plan_page(&content, &OPTIONS, "a\"b.pdf");

    assert!(page.contains("Mining&lt;Hub&gt; &amp; Co"));
    assert!(page.contains("<li>&lt;script&gt;alert(1)"));
    assert!(!page.contains("<script>"));
    assert!(page.contains(r#"href="a&quot;b.pdf""#));
}
