//! Condition-to-advice lookup.
//!
//! The table is process-wide constant data: built once on first use,
//! read-only for the life of the process. Resolution never fails — an
//! unknown label falls through to the default record.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::normalize::normalize_symptom;
use crate::models::{AdviceRecord, NutritionAdvice};

struct AdviceTable {
    by_label: HashMap<&'static str, AdviceRecord>,
    by_key: HashMap<String, &'static str>,
    default: AdviceRecord,
}

static ADVICE: LazyLock<AdviceTable> = LazyLock::new(build_table);

/// Resolve guidance for a predicted condition label.
///
/// Lookup order: exact label, then the case-folded/normalized form,
/// then the default record.
pub fn resolve_advice(label: &str) -> &'static AdviceRecord {
    let table = &*ADVICE;
    if let Some(record) = table.by_label.get(label) {
        return record;
    }
    if let Some(canonical) = table.by_key.get(&normalize_symptom(label)) {
        return &table.by_label[canonical];
    }
    &table.default
}

#[allow(clippy::too_many_arguments)]
fn record(
    short: &str,
    avoid: &[&str],
    do_actions: &[&str],
    prevention: &[&str],
    recommended: &[&str],
    nutrition_avoid: &[&str],
    urgent: bool,
    notes: &str,
) -> AdviceRecord {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
    AdviceRecord {
        short: short.to_string(),
        avoid: strings(avoid),
        do_actions: strings(do_actions),
        prevention: strings(prevention),
        nutrition: NutritionAdvice {
            recommended: strings(recommended),
            avoid: strings(nutrition_avoid),
        },
        urgent,
        notes: notes.to_string(),
    }
}

fn build_table() -> AdviceTable {
    let mut by_label = HashMap::new();

    by_label.insert(
        "Flu",
        record(
            "Likely viral flu — rest, fluids, and monitor symptoms closely.",
            &[
                "Avoid crowded places to prevent spreading infection",
                "Avoid heavy physical exertion until recovery",
                "Avoid alcohol and smoking as they slow recovery",
                "Avoid cold or refrigerated food/drinks during fever",
            ],
            &[
                "Stay hydrated — drink warm water, soups, and herbal tea",
                "Take paracetamol/acetaminophen for fever or pain (as advised)",
                "Get plenty of rest and sleep",
                "Eat light, nutritious meals (soups, fruits, and cooked vegetables)",
                "Use a humidifier or inhale steam to relieve congestion",
                "Cover mouth and nose when sneezing or coughing",
                "Wash hands frequently with soap or sanitizer",
            ],
            &[
                "Get a yearly flu vaccination if available",
                "Maintain good personal hygiene",
                "Avoid close contact with sick individuals",
                "Keep your immune system strong with a healthy diet and enough sleep",
            ],
            &[
                "Citrus fruits (Vitamin C)",
                "Garlic",
                "Ginger",
                "Honey",
                "Warm soups",
                "Turmeric milk",
            ],
            &["Cold drinks", "Fried and processed foods", "Sugar-rich foods"],
            false,
            "Seek urgent medical care if you experience difficulty breathing, chest pain, \
             persistent vomiting, confusion, dehydration, or a high fever (>39°C) lasting \
             more than 3 days. Elderly, pregnant women, or those with chronic conditions \
             should consult a doctor early.",
        ),
    );

    by_label.insert(
        "Heart Disease",
        record(
            "Possible cardiac risk — seek medical advice and maintain heart-healthy habits.",
            &[
                "Avoid strenuous exercise until cleared by a doctor",
                "Avoid high-salt and high-fat foods (processed meats, fried foods, junk food)",
                "Avoid smoking and alcohol",
                "Avoid stress, anxiety, and lack of sleep",
                "Avoid skipping prescribed medications",
            ],
            &[
                "Consult a cardiologist for evaluation and tests (ECG, Echo, etc.)",
                "Take prescribed medications regularly and on time",
                "Maintain a balanced diet rich in fruits, vegetables, whole grains, and lean protein",
                "Engage in light physical activity (like walking) if approved by your doctor",
                "Monitor blood pressure, cholesterol, and blood sugar regularly",
                "Get adequate rest and hydration",
                "Practice yoga or meditation for stress relief",
            ],
            &[
                "Maintain a healthy weight and BMI",
                "Control diabetes, cholesterol, and hypertension",
                "Exercise regularly (after doctor approval)",
                "Limit salt and sugar intake",
                "Quit smoking",
                "Have regular heart check-ups, especially with family history",
            ],
            &[
                "Oats and whole grains",
                "Leafy greens (spinach, kale)",
                "Berries and citrus fruits",
                "Fish rich in omega-3 (salmon, tuna)",
                "Nuts (almonds, walnuts)",
                "Olive oil instead of butter",
            ],
            &[
                "Fried foods and processed snacks",
                "Red meats and full-fat dairy",
                "Salted chips and pickles",
                "Sugary drinks and sweets",
            ],
            true,
            "Seek **emergency care** if you experience severe chest pain, pain radiating \
             to the arm/jaw, sweating, fainting, or shortness of breath.",
        ),
    );

    by_label.insert(
        "Kidney Disease",
        record(
            "Possible kidney function issue — maintain hydration and avoid kidney stress.",
            &[
                "High-salt and high-protein diets (red meat, processed food)",
                "Painkillers like ibuprofen or diclofenac without advice",
                "Dehydration or skipping fluids",
                "Unregulated supplements or herbal medicines",
                "Smoking and alcohol",
            ],
            &[
                "Drink adequate water (as advised by your doctor)",
                "Limit salt and potassium if prescribed",
                "Monitor blood pressure and blood sugar regularly",
                "Eat a kidney-friendly diet (low sodium, moderate protein)",
                "Consult a nephrologist for diagnosis and tests",
                "Track urine output and swelling signs daily",
            ],
            &[
                "Control diabetes and blood pressure",
                "Avoid overuse of painkillers",
                "Regular kidney checkups (creatinine, GFR)",
                "Maintain healthy weight and regular exercise",
            ],
            &[
                "Apples, cabbage, cauliflower",
                "Egg whites and lean meats (in moderation)",
                "Rice, pasta, and unsalted snacks",
            ],
            &[
                "Bananas, oranges, tomatoes (high potassium)",
                "Processed meats, pickles, and chips",
                "Colas and caffeine-heavy drinks",
            ],
            true,
            "Seek medical care if you notice swelling, reduced urination, or frothy urine. \
             Early diagnosis can prevent kidney failure.",
        ),
    );

    by_label.insert(
        "Anemia",
        record(
            "Low hemoglobin or red blood cell count — may cause fatigue and weakness.",
            &[
                "Skipping meals",
                "Tea or coffee right after meals",
                "Crash dieting without supervision",
            ],
            &[
                "Eat iron-rich foods (spinach, beetroot, lentils, red meat, jaggery)",
                "Include vitamin C sources (orange, amla, lemon)",
                "Take iron supplements if prescribed",
                "Regular hemoglobin checkups",
            ],
            &[
                "Eat balanced meals",
                "Ensure adequate iron and folate intake",
                "Avoid long gaps between meals",
                "Regular health screening",
            ],
            &[
                "Leafy greens, pomegranate, beetroot, dates",
                "Lean meats and lentils",
                "Vitamin C-rich foods (orange, lemon, amla)",
            ],
            &[
                "Coffee/tea right after meals",
                "Excess dairy (can reduce iron absorption)",
            ],
            false,
            "If you experience severe fatigue, dizziness, or shortness of breath, consult \
             a doctor for blood tests.",
        ),
    );

    by_label.insert(
        "Dengue",
        record(
            "Possible dengue infection — monitor fever and hydration closely.",
            &[
                "Painkillers like ibuprofen or aspirin (increase bleeding risk)",
                "Dehydration",
                "Ignoring persistent vomiting or abdominal pain",
            ],
            &[
                "Drink plenty of fluids (ORS, water, juices)",
                "Take paracetamol for fever (avoid NSAIDs)",
                "Rest as much as possible",
                "Monitor platelet count and temperature daily",
            ],
            &[
                "Avoid mosquito bites (use repellents, nets)",
                "Remove stagnant water near your home",
                "Wear long-sleeved clothing",
                "Stay indoors during mosquito-active hours",
            ],
            &[
                "Papaya leaves extract (if advised)",
                "Coconut water",
                "Pomegranate, kiwi, oranges",
                "Soups and juices",
            ],
            &["Caffeine", "Oily or spicy food", "Junk food"],
            true,
            "If you notice bleeding, abdominal pain, or restlessness, visit a hospital \
             immediately. Severe dengue can be life-threatening.",
        ),
    );

    let by_key = by_label
        .keys()
        .map(|label| (normalize_symptom(label), *label))
        .collect();

    let default = record(
        "No specific guidance available for this condition.",
        &[],
        &["Consult a healthcare provider for personalized advice."],
        &[],
        &[],
        &[],
        false,
        "",
    );

    AdviceTable {
        by_label,
        by_key,
        default,
    }
}
