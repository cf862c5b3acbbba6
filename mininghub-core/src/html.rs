use v_htmlescape::escape;

use crate::calculator::monthly_income;
use crate::content::PlanContent;
use crate::render::RenderOptions;

/// Render the whole plan page. `pdf_href` is the link target of the
/// download button, usually the configured PDF filename.
pub fn render_plan_page(content: &PlanContent, options: &RenderOptions, pdf_href: &str) -> String {
    let copy = &content.pdf_copy;
    let package = &content.package;
    let explainer = &content.crypto_mining_explainer;
    let monthly = monthly_income(package.daily_credit);

    format!(
        r##"<!DOCTYPE html>
<html lang="hi">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{name}</title>
    <style>
        body {{
            margin: 0;
            font-family: system-ui, -apple-system, 'Segoe UI', 'Noto Sans Devanagari', sans-serif;
            background: #f6f8f6;
            color: #3c3c3c;
        }}
        header {{
            display: flex;
            justify-content: space-between;
            align-items: center;
            padding: 1rem 2rem;
            background: #fff;
            border-bottom: 1px solid #e2e2e2;
        }}
        header h1 {{
            margin: 0;
            color: #228b22;
        }}
        header p {{
            margin: 0.25rem 0 0;
            color: #646464;
        }}
        .download {{
            padding: 0.75rem 1.4rem;
            border-radius: 10px;
            background: #228b22;
            color: #fff;
            font-weight: 600;
            text-decoration: none;
        }}
        main {{
            width: min(960px, 94vw);
            margin: 2rem auto;
        }}
        section {{
            background: #fff;
            border: 1px solid #e6e6e6;
            border-radius: 14px;
            padding: 1.5rem 2rem;
            margin-bottom: 1.5rem;
        }}
        .cards {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
            gap: 1rem;
        }}
        .card {{
            text-align: center;
            padding: 1rem;
            border-radius: 10px;
            background: #f0f8ff;
        }}
        .card strong {{
            display: block;
            font-size: 1.6rem;
            color: #228b22;
        }}
        table {{
            width: 100%;
            border-collapse: collapse;
        }}
        td {{
            padding: 0.6rem 1rem;
            border-top: 1px solid #dcdcdc;
        }}
        td.value {{
            text-align: right;
            font-weight: 600;
            color: #228b22;
        }}
        .calculator {{
            background: #fffaf0;
            border: 1px solid #228b22;
            border-radius: 10px;
            padding: 1rem 1.5rem;
        }}
        .note, footer {{
            color: #969696;
            font-size: 0.85rem;
        }}
        footer {{
            text-align: center;
            padding: 1rem 0 2rem;
        }}
    </style>
</head>
<body>
    <header>
        <div>
            <h1>{name}</h1>
            <p>{tagline}</p>
        </div>
        <a class="download" href="{pdf_href}" download>Download PDF</a>
    </header>
    <main>
        <section id="about">
            <h2>{about_title}</h2>
            <p>{description}</p>
            <h3>{services_title}</h3>
            {services}
            <h3>{benefits_title}</h3>
            {benefits}
        </section>
        <section id="explainer">
            <h2>{explainer_title}</h2>
            <h3>{what_is_title}</h3>
            <p>{what_is_content}</p>
            <h3>{how_title}</h3>
            {how_points}
        </section>
        <section id="package">
            <h2>{package_title}</h2>
            <div class="cards">
                {package_cards}
            </div>
        </section>
        <section id="referral">
            <h2>{referral_title}</h2>
            <p>{referral_text}{direct_reward}</p>
            <h3>{level_title}</h3>
            <div class="cards">
                {level_cards}
            </div>
        </section>
        <section id="team-rewards">
            <h2>{team_title}</h2>
            <table>
                {team_rows}
            </table>
        </section>
        <section id="deposit-withdrawal">
            <h2>{deposit_title}</h2>
            <p><strong>{deposit_label}</strong> {deposit_method}</p>
            <h3>{withdrawal_label}</h3>
            {withdrawal_features}
        </section>
        <section id="income-calculator">
            <h2>{calculator_title}</h2>
            <div class="calculator">
                <p>{investment_label} ${amount}</p>
                <p>{daily_label} ${daily_credit}</p>
                <p>{monthly_label} ${monthly}</p>
            </div>
            <p class="note">{calculator_note}</p>
        </section>
    </main>
    <footer>&copy; {year} {name}. All rights reserved. {footer_generated}</footer>
</body>
</html>"##,
        name = escape(&content.name),
        tagline = escape(&content.tagline),
        pdf_href = escape(pdf_href),
        about_title = escape(&copy.about_title),
        description = escape(&content.description),
        services_title = escape(&copy.services_title),
        services = render_list(&content.services),
        benefits_title = escape(&copy.benefits_title),
        benefits = render_list(&content.benefits),
        explainer_title = escape(&explainer.title),
        what_is_title = escape(&explainer.what_is_mining.title),
        what_is_content = escape(&explainer.what_is_mining.content),
        how_title = escape(&explainer.how_it_works.title),
        how_points = render_list(&explainer.how_it_works.points),
        package_title = escape(&copy.package_title),
        package_cards = render_package_cards(content),
        referral_title = escape(&copy.referral_title),
        referral_text = escape(&copy.referral_text),
        direct_reward = content.referral.direct_reward,
        level_title = escape(&copy.level_income_title),
        level_cards = render_level_cards(content),
        team_title = escape(&copy.team_rewards_title),
        team_rows = render_team_rows(content),
        deposit_title = escape(&copy.deposit_withdrawal_title),
        deposit_label = escape(&copy.deposit_method_label),
        deposit_method = escape(&content.deposit.method),
        withdrawal_label = escape(&copy.withdrawal_features_label),
        withdrawal_features = render_list(&content.withdrawal.features),
        calculator_title = escape(&copy.income_calculator_title),
        investment_label = escape(&copy.income_calculator_labels.investment),
        amount = package.amount,
        daily_label = escape(&copy.income_calculator_labels.daily_earning),
        daily_credit = package.daily_credit,
        monthly_label = escape(&copy.income_calculator_labels.monthly_earning),
        monthly = monthly,
        calculator_note = escape(&copy.income_calculator_note),
        year = options.year,
        footer_generated = escape(&copy.footer_generated),
    )
}

fn render_list(items: &[String]) -> String {
    let items: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect();
    format!("<ul>{}</ul>", items)
}

fn render_package_cards(content: &PlanContent) -> String {
    let labels = &content.pdf_copy.package_labels;
    let package = &content.package;
    [
        (&labels.single_package, package.amount),
        (&labels.daily_credit, package.daily_credit),
        (&labels.monthly_earning, monthly_income(package.daily_credit)),
    ]
    .into_iter()
    .map(|(label, value)| {
        format!(
            r#"<div class="card"><strong>${}</strong>{}</div>"#,
            value,
            escape(label)
        )
    })
    .collect()
}

fn render_level_cards(content: &PlanContent) -> String {
    let label = escape(&content.pdf_copy.level_label).to_string();
    content
        .level_income
        .iter()
        .map(|level| {
            format!(
                r#"<div class="card">{} {}<strong>{}%</strong></div>"#,
                label, level.level, level.percentage
            )
        })
        .collect()
}

fn render_team_rows(content: &PlanContent) -> String {
    let labels = &content.pdf_copy.team_rewards_labels;
    content
        .team_rewards
        .iter()
        .map(|reward| {
            format!(
                r#"<tr><td>{} {}</td><td class="value">${} {}</td></tr>"#,
                reward.team_size,
                escape(&labels.members),
                reward.monthly_reward,
                escape(&labels.per_month)
            )
        })
        .collect()
}
