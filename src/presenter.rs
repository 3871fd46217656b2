//! Text presentation layer
//!
//! Pure rendering: stage -> prompt text, error category -> error text,
//! Report -> formatted report. English plus Egyptian Arabic. Nothing in
//! here mutates flow state; the state machine stays format-agnostic.

use crate::intake::IntakeStage;
use crate::models::{Language, PartnerId, Report};
use crate::validators::ValidationError;

/// Currency formatting: `AED 52,833.33`.
pub fn money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    // Sign comes from the rounded cents, so -0.004 is plain "AED 0.00"
    let negative = amount < 0.0 && cents > 0;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("AED {sign}{grouped}.{frac:02}")
}

/// Prompt for the given stage, with room index / bed count interpolated.
///
/// The language prompt itself is always bilingual-by-construction: it is
/// asked before a language exists, so it renders in English with both
/// options spelled out.
pub fn prompt_text(lang: Language, stage: &IntakeStage) -> String {
    match (lang, stage) {
        (_, IntakeStage::SelectLanguage) => {
            "🌐 Choose language:\n1 = English\n2 = Egyptian Arabic\n\nClick 1 or 2 (or type).".into()
        }

        (Language::English, IntakeStage::SelectLocation) => {
            "📍 Choose location:\n1 = Dubai\n2 = Sharjah\n\nClick 1 or 2.".into()
        }
        (Language::Arabic, IntakeStage::SelectLocation) => {
            "📍 اختار المكان:\n1 = دبي\n2 = الشارقة\n\nاضغط 1 أو 2.".into()
        }

        (Language::English, IntakeStage::EnterRoomCount) => {
            "🚪 How many rooms does the apartment have? (0 if only a hall)".into()
        }
        (Language::Arabic, IntakeStage::EnterRoomCount) => {
            "🚪 الشقة فيها كام أوضة؟ (اكتب 0 لو مفيش غير الصالة)".into()
        }

        (Language::English, IntakeStage::EnterRoomBeds { room }) => {
            format!("🛏️ Room {room}: how many beds? (0 if unused)")
        }
        (Language::Arabic, IntakeStage::EnterRoomBeds { room }) => {
            format!("🛏️ أوضة {room}: فيها كام سرير؟ (اكتب 0 لو فاضية)")
        }

        (Language::English, IntakeStage::EnterRoomDoubles { room, beds }) => {
            format!("🛏️ Room {room}: how many of the {beds} beds are doubles?")
        }
        (Language::Arabic, IntakeStage::EnterRoomDoubles { room, beds }) => {
            format!("🛏️ أوضة {room}: من الـ {beds} سرير، كام سرير دبل؟")
        }

        (Language::English, IntakeStage::EnterHallBeds) => {
            "🛋️ How many beds in the hall? (0 if none)".into()
        }
        (Language::Arabic, IntakeStage::EnterHallBeds) => {
            "🛋️ الصالة فيها كام سرير؟ (اكتب 0 لو مفيش)".into()
        }

        (Language::English, IntakeStage::EnterHallDoubles { beds }) => {
            format!("🛋️ How many of the {beds} hall beds are doubles?")
        }
        (Language::Arabic, IntakeStage::EnterHallDoubles { beds }) => {
            format!("🛋️ من الـ {beds} سرير في الصالة، كام سرير دبل؟")
        }

        (Language::English, IntakeStage::EnterBedPrice) => {
            "🛏️ Enter monthly bed price (AED) (per bed).".into()
        }
        (Language::Arabic, IntakeStage::EnterBedPrice) => {
            "🛏️ اكتب سعر السرير الشهري بالدرهم (لكل سرير).".into()
        }

        (Language::English, IntakeStage::EnterYearlyRent) => {
            "💰 Enter yearly rent (AED). Example: 85000".into()
        }
        (Language::Arabic, IntakeStage::EnterYearlyRent) => {
            "💰 اكتب الإيجار السنوي بالدرهم (مثال: 85000)".into()
        }

        (Language::English, IntakeStage::SelectManager) => {
            "🧾 Choose manager:\n1 - 50% Partner\n2 - Normal Partner (12.5%)\n\nClick the button or type 1/2.".into()
        }
        (Language::Arabic, IntakeStage::SelectManager) => {
            "🧾 اختار المدير:\n1 - شريك 50%\n2 - شريك عادي (12.5%)\n\nاضغط الزر أو اكتب 1/2.".into()
        }
    }
}

/// Error line shown before a re-prompt.
pub fn error_text(lang: Language, error: ValidationError) -> &'static str {
    match (lang, error) {
        (Language::English, ValidationError::NotANumber) => {
            "⚠️ Invalid number — send digits only (e.g. 85000)."
        }
        (Language::Arabic, ValidationError::NotANumber) => {
            "⚠️ رقم مش صالح — ابعت أرقام بس (مثال: 85000)."
        }
        (Language::English, ValidationError::InvalidOption) => {
            "⚠️ Invalid choice — press a button or type the number."
        }
        (Language::Arabic, ValidationError::InvalidOption) => {
            "⚠️ اختيار غلط — اضغط الزر أو اكتب الرقم."
        }
        (Language::English, ValidationError::DoublesExceedBeds) => {
            "⚠️ Double beds can't exceed the bed count — try again."
        }
        (Language::Arabic, ValidationError::DoublesExceedBeds) => {
            "⚠️ عدد السراير الدبل مينفعش يزيد عن عدد السراير — جرب تاني."
        }
    }
}

pub fn processing_text(lang: Language) -> &'static str {
    match lang {
        Language::English => "🔎 Calculating...",
        Language::Arabic => "🔎 بحسب... لحظة.",
    }
}

pub fn done_text(lang: Language) -> &'static str {
    match lang {
        Language::English => "✅ Done — to calculate another apartment, click /start.",
        Language::Arabic => "✅ تمام — لو عايز تحسب تاني، اضغط /start.",
    }
}

pub fn cancelled_text(lang: Language) -> &'static str {
    match lang {
        Language::English => "Cancelled.",
        Language::Arabic => "تم الإلغاء.",
    }
}

pub fn guide_text(lang: Language) -> &'static str {
    match lang {
        Language::English => {
            "Quick guide:\n/start — restart\nAnswer step-by-step by clicking buttons or typing numbers."
        }
        Language::Arabic => "دليل سريع:\n/start — ابدأ من الأول\nجاوب بالضغط أو بكتابة الأرقام.",
    }
}

pub fn no_session_text(lang: Language) -> &'static str {
    match lang {
        Language::English => "Click /start to begin a new calculation.",
        Language::Arabic => "اضغط /start عشان تبدأ حساب جديد.",
    }
}

fn partner_block(report: &Report, lang: Language) -> String {
    let mut lines = Vec::new();
    match lang {
        Language::Arabic => lines.push("🔸 توزيع الأرباح:".to_string()),
        Language::English => lines.push("🔸 Partners distribution:".to_string()),
    }

    for p in &report.partners {
        match lang {
            Language::Arabic => {
                let mgr = if p.is_manager { " 👑 (المدير)" } else { "" };
                lines.push(format!(
                    "• {}{}\n  - نسبة: {:.2}%\n  - الاستثمار الابتدائي: {}\n  - الربح السنوي: {}\n  - شهريًا: {}\n  - عائد: {:.2}%\n",
                    p.id,
                    mgr,
                    p.ownership_pct,
                    money(p.initial_investment),
                    money(p.yearly_profit),
                    money(p.monthly_profit),
                    p.roi_pct
                ));
            }
            Language::English => {
                let mgr = if p.is_manager { " 👑 (Manager)" } else { "" };
                lines.push(format!(
                    "• {}{}\n  - Own%: {:.2}%\n  - Initial: {}\n  - Yearly: {}\n  - Monthly: {}\n  - ROI: {:.2}%\n",
                    p.id,
                    mgr,
                    p.ownership_pct,
                    money(p.initial_investment),
                    money(p.yearly_profit),
                    money(p.monthly_profit),
                    p.roi_pct
                ));
            }
        }
    }

    lines.join("\n")
}

/// Render the full report text.
pub fn format_report(report: &Report, lang: Language) -> String {
    let mut parts = Vec::new();

    match lang {
        Language::Arabic => {
            parts.push("📊 تقرير استثماري للشقة\n".to_string());
            parts.push("──────── تفاصيل المصاريف ────────".to_string());
        }
        Language::English => {
            parts.push("📊 Apartment Investment Report\n".to_string());
            parts.push("──────── Initial Cost Breakdown ────────".to_string());
        }
    }

    parts.push("```".to_string());
    match lang {
        Language::Arabic => {
            parts.push(format!("الإيجار الشهري:           {}", money(report.monthly_rent)));
            parts.push(format!(
                "الدفع المسبق ({} شهر): {}",
                report.upfront_months,
                money(report.upfront_payment)
            ));
            parts.push(format!("العمولة + الضمان:         {}", money(report.commission_deposit)));
            parts.push(format!("المستندات القانونية:     {}", money(report.legal_fee)));
            parts.push(format!("الأثاث:                  {}", money(report.furniture_fee)));
            parts.push(format!("إجمالي التكلفة الأولية:   {}", money(report.total_initial_cost)));
        }
        Language::English => {
            parts.push(format!("Monthly rent:           {}", money(report.monthly_rent)));
            parts.push(format!(
                "Upfront payment ({} mo): {}",
                report.upfront_months,
                money(report.upfront_payment)
            ));
            parts.push(format!("Commission + Deposit:   {}", money(report.commission_deposit)));
            parts.push(format!("Legal:                  {}", money(report.legal_fee)));
            parts.push(format!("Furniture:              {}", money(report.furniture_fee)));
            parts.push(format!("Total initial cost:     {}", money(report.total_initial_cost)));
        }
    }
    parts.push("```".to_string());

    match lang {
        Language::Arabic => parts.push("──────── الدخل والمصروفات ────────".to_string()),
        Language::English => parts.push("──────── Income & Expenses ────────".to_string()),
    }
    parts.push("```".to_string());
    parts.push(format!("Total bed units:        {}", report.total_bed_units));
    parts.push(format!("Total monthly income:   {}", money(report.monthly_income)));
    parts.push(format!("Total monthly expenses: {}", money(report.total_monthly_expenses)));
    parts.push(format!("Net monthly profit:     {}", money(report.net_monthly_profit)));
    parts.push(format!(
        "Net profit (10 months): {}",
        money(report.net_profit_first_ten_months)
    ));
    parts.push(format!("True Net Profit (Y1):   {}", money(report.true_net_profit_year1)));
    parts.push("```".to_string());

    match lang {
        Language::Arabic => parts.push("──────── رسوم المدير ────────".to_string()),
        Language::English => parts.push("──────── Manager Fee ────────".to_string()),
    }
    parts.push("```".to_string());
    match lang {
        Language::Arabic => {
            parts.push(format!("المدير:                 {}", report.manager_partner));
            parts.push(format!("مكافأة المدير 15%:      {}", money(report.manager_fee)));
            parts.push(format!(
                "المتبقي للشركاء:         {}",
                money(report.remaining_after_manager_fee)
            ));
        }
        Language::English => {
            parts.push(format!("Manager:                {}", report.manager_partner));
            parts.push(format!("Manager 15% amount:     {}", money(report.manager_fee)));
            parts.push(format!(
                "Remaining for partners: {}",
                money(report.remaining_after_manager_fee)
            ));
        }
    }
    parts.push("```".to_string());

    parts.push(partner_block(report, lang));

    // Profitability summary: P1's ROI vs the average of the 12.5% partners
    let p1_roi = report
        .partner(PartnerId::P1)
        .map(|p| p.roi_pct)
        .unwrap_or(0.0);
    let minor_avg = {
        let minors: Vec<f64> = report
            .partners
            .iter()
            .filter(|p| p.id != PartnerId::P1)
            .map(|p| p.roi_pct)
            .collect();
        if minors.is_empty() {
            0.0
        } else {
            minors.iter().sum::<f64>() / minors.len() as f64
        }
    };

    match lang {
        Language::Arabic => {
            parts.push("──────── ملخص الربحية ────────".to_string());
            parts.push(format!(
                "صافي الربح الحقيقي (سنة1): {}",
                money(report.true_net_profit_year1)
            ));
            parts.push(format!("عائد شريك 50%: {p1_roi:.2}%"));
            parts.push(format!("عائد الشركاء 12.5% (متوسط): {minor_avg:.2}%"));
            parts.push(format!("مكافأة المدير: {}", money(report.manager_fee)));
        }
        Language::English => {
            parts.push("──────── Profitability Summary ────────".to_string());
            parts.push(format!(
                "Total true net profit (Y1): {}",
                money(report.true_net_profit_year1)
            ));
            parts.push(format!("ROI - 50% partner: {p1_roi:.2}%"));
            parts.push(format!("ROI - 12.5% partners (avg): {minor_avg:.2}%"));
            parts.push(format!("Manager fee: {}", money(report.manager_fee)));
        }
    }

    parts.join("\n")
}
