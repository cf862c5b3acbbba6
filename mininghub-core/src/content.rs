/// Static description of the MiningHub investment plan. Built once with
/// [`PlanContent::mininghub`] and shared by reference; nothing mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanContent {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub services: Vec<String>,
    pub benefits: Vec<String>,
    pub package: Package,
    pub referral: Referral,
    /// Expected unique and ascending by level; not enforced.
    pub level_income: Vec<LevelIncome>,
    /// Expected ascending by team size; not enforced.
    pub team_rewards: Vec<TeamReward>,
    pub deposit: Deposit,
    pub withdrawal: Withdrawal,
    pub crypto_mining_explainer: CryptoMiningExplainer,
    pub pdf_copy: PdfCopy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Package {
    pub amount: f64,
    pub daily_credit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Referral {
    pub direct_reward: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelIncome {
    pub level: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamReward {
    pub team_size: u32,
    pub monthly_reward: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Deposit {
    pub method: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Withdrawal {
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CryptoMiningExplainer {
    pub title: String,
    pub what_is_mining: TitledText,
    pub how_it_works: TitledList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitledText {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitledList {
    pub title: String,
    pub points: Vec<String>,
}

/// Section titles and labels printed by the renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfCopy {
    pub about_title: String,
    pub services_title: String,
    pub benefits_title: String,
    pub package_title: String,
    pub package_labels: PackageLabels,
    pub referral_title: String,
    /// Printed directly before the reward amount.
    pub referral_text: String,
    pub level_income_title: String,
    pub level_label: String,
    pub team_rewards_title: String,
    pub team_rewards_labels: TeamRewardLabels,
    pub deposit_withdrawal_title: String,
    pub deposit_method_label: String,
    pub withdrawal_features_label: String,
    pub income_calculator_title: String,
    pub income_calculator_labels: IncomeCalculatorLabels,
    pub income_calculator_note: String,
    pub footer_generated: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageLabels {
    pub single_package: String,
    pub daily_credit: String,
    pub monthly_earning: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamRewardLabels {
    pub members: String,
    pub per_month: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeCalculatorLabels {
    pub investment: String,
    pub daily_earning: String,
    pub monthly_earning: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl PlanContent {
    /// The published MiningHub plan.
    pub fn mininghub() -> Self {
        PlanContent {
            name: "MiningHub".to_string(),
            tagline: "ब्लॉकचेन डेवलपमेंट और क्रिप्टो माइनिंग प्लेटफॉर्म".to_string(),
            description: "MiningHub एक ब्लॉकचेन-आधारित प्लेटफॉर्म है जो उन्नत ब्लॉकचेन विकास, \
                क्रिप्टो माइनिंग समाधान और एक सुरक्षित कमाई प्रणाली प्रदान करता है। उपयोगकर्ता \
                माइनिंग, ROI कमाई और रेफरल आय के माध्यम से कमा सकते हैं।"
                .to_string(),
            services: strings(&[
                "उन्नत ब्लॉकचेन तकनीक",
                "सुरक्षित क्रिप्टो माइनिंग सिस्टम",
                "पारदर्शी कमाई पैनल",
                "रेफर करें और कमाएं कार्यक्रम",
            ]),
            benefits: strings(&[
                "दैनिक कमाई प्रणाली",
                "कम निवेश पैकेज",
                "सुरक्षित USDT BEP20 जमा",
                "तत्काल निकासी",
                "शक्तिशाली रेफरल आय मॉडल",
                "कई आय स्रोत",
            ]),
            package: Package {
                amount: 20.0,
                daily_credit: 0.6,
            },
            referral: Referral { direct_reward: 2.0 },
            level_income: [(1, 5.0), (2, 3.0), (3, 1.0), (4, 1.0), (5, 1.0)]
                .into_iter()
                .map(|(level, percentage)| LevelIncome { level, percentage })
                .collect(),
            team_rewards: [
                (100, 180.0),
                (300, 250.0),
                (700, 300.0),
                (1000, 400.0),
                (2000, 700.0),
            ]
            .into_iter()
            .map(|(team_size, monthly_reward)| TeamReward {
                team_size,
                monthly_reward,
            })
            .collect(),
            deposit: Deposit {
                method: "USDT BEP20".to_string(),
            },
            withdrawal: Withdrawal {
                features: strings(&[
                    "तत्काल निकासी",
                    "पूर्ण ट्रैकिंग सिस्टम",
                    "सुरक्षित प्रोसेसिंग",
                    "पारदर्शी इतिहास",
                ]),
            },
            crypto_mining_explainer: CryptoMiningExplainer {
                title: "क्रिप्टो माइनिंग क्या है और यह कैसे काम करती है".to_string(),
                what_is_mining: TitledText {
                    title: "क्रिप्टो माइनिंग क्या है?".to_string(),
                    content: "क्रिप्टो माइनिंग एक प्रक्रिया है जिसमें शक्तिशाली कंप्यूटर जटिल \
                        गणितीय समस्याओं को हल करते हैं ताकि ब्लॉकचेन नेटवर्क पर लेनदेन को सत्यापित \
                        और सुरक्षित किया जा सके। जब माइनर्स इन समस्याओं को सफलतापूर्वक हल करते हैं, \
                        तो उन्हें क्रिप्टोकरेंसी के रूप में पुरस्कार मिलता है। यह प्रक्रिया ब्लॉकचेन \
                        नेटवर्क की सुरक्षा और विकेंद्रीकरण को बनाए रखने में महत्वपूर्ण भूमिका निभाती है।"
                        .to_string(),
                },
                how_it_works: TitledList {
                    title: "यह कैसे काम करती है?".to_string(),
                    points: strings(&[
                        "लेनदेन सत्यापन: माइनर्स नेटवर्क पर होने वाले लेनदेन को सत्यापित करते हैं और उन्हें ब्लॉक में समूहित करते हैं।",
                        "हैशिंग प्रक्रिया: शक्तिशाली कंप्यूटर जटिल क्रिप्टोग्राफिक हैश फंक्शन को हल करने के लिए प्रतिस्पर्धा करते हैं।",
                        "ब्लॉक निर्माण: पहला माइनर जो समस्या को हल करता है, वह नया ब्लॉक ब्लॉकचेन में जोड़ता है।",
                        "पुरस्कार प्राप्ति: सफल माइनर को नई क्रिप्टोकरेंसी और लेनदेन शुल्क के रूप में पुरस्कार मिलता है।",
                        "नेटवर्क सुरक्षा: यह प्रक्रिया नेटवर्क को सुरक्षित और विकेंद्रीकृत रखती है, जिससे कोई भी एक पक्ष नियंत्रण नहीं कर सकता।",
                        "ऊर्जा और संसाधन: माइनिंग के लिए विशेष हार्डवेयर (ASIC, GPU) और बिजली की आवश्यकता होती है।",
                    ]),
                },
            },
            pdf_copy: PdfCopy {
                about_title: "MiningHub के बारे में".to_string(),
                services_title: "हम क्या करते हैं:".to_string(),
                benefits_title: "MiningHub में क्यों शामिल हों:".to_string(),
                package_title: "निवेश पैकेज".to_string(),
                package_labels: PackageLabels {
                    single_package: "एकल पैकेज:".to_string(),
                    daily_credit: "दैनिक क्रेडिट:".to_string(),
                    monthly_earning: "मासिक कमाई:".to_string(),
                },
                referral_title: "रेफरल सिस्टम".to_string(),
                referral_text: "प्रत्यक्ष रेफरल पुरस्कार: $".to_string(),
                level_income_title: "लेवल आय (ROI प्रतिशत)".to_string(),
                level_label: "लेवल".to_string(),
                team_rewards_title: "टीम पुरस्कार (मासिक)".to_string(),
                team_rewards_labels: TeamRewardLabels {
                    members: "सदस्य".to_string(),
                    per_month: "प्रति माह".to_string(),
                },
                deposit_withdrawal_title: "जमा और निकासी".to_string(),
                deposit_method_label: "जमा विधि:".to_string(),
                withdrawal_features_label: "निकासी सुविधाएं:".to_string(),
                income_calculator_title: "आय कैलकुलेटर उदाहरण".to_string(),
                income_calculator_labels: IncomeCalculatorLabels {
                    investment: "निवेश:".to_string(),
                    daily_earning: "दैनिक कमाई:".to_string(),
                    monthly_earning: "मासिक कमाई:".to_string(),
                },
                income_calculator_note: "* टीम पुरस्कार, रेफरल और लेवल आय से अतिरिक्त कमाई आपकी कुल \
                    मासिक आय को काफी बढ़ा सकती है।"
                    .to_string(),
                footer_generated: "MiningHub निवेश योजना से उत्पन्न".to_string(),
            },
        }
    }
}
