use serde::Serialize;

/// One taxonomy entry with both display languages.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LookupItem {
    pub key: &'static str,
    pub label_en: &'static str,
    pub label_ar: &'static str,
}

pub const JOB_CATEGORIES: &[LookupItem] = &[
    LookupItem { key: "engineering", label_en: "Engineering", label_ar: "الهندسة" },
    LookupItem { key: "information-technology", label_en: "Information Technology", label_ar: "تقنية المعلومات" },
    LookupItem { key: "healthcare", label_en: "Healthcare", label_ar: "الرعاية الصحية" },
    LookupItem { key: "education", label_en: "Education", label_ar: "التعليم" },
    LookupItem { key: "finance", label_en: "Finance & Accounting", label_ar: "المالية والمحاسبة" },
    LookupItem { key: "marketing", label_en: "Marketing & Sales", label_ar: "التسويق والمبيعات" },
    LookupItem { key: "construction", label_en: "Construction", label_ar: "الإنشاءات" },
    LookupItem { key: "hospitality", label_en: "Hospitality & Tourism", label_ar: "الضيافة والسياحة" },
    LookupItem { key: "legal", label_en: "Legal", label_ar: "القانون" },
    LookupItem { key: "human-resources", label_en: "Human Resources", label_ar: "الموارد البشرية" },
];

pub const JOB_TYPES: &[LookupItem] = &[
    LookupItem { key: "full-time", label_en: "Full Time", label_ar: "دوام كامل" },
    LookupItem { key: "part-time", label_en: "Part Time", label_ar: "دوام جزئي" },
    LookupItem { key: "contract", label_en: "Contract", label_ar: "عقد" },
    LookupItem { key: "remote", label_en: "Remote", label_ar: "عن بُعد" },
    LookupItem { key: "internship", label_en: "Internship", label_ar: "تدريب" },
];

pub const CITIES: &[LookupItem] = &[
    LookupItem { key: "riyadh", label_en: "Riyadh", label_ar: "الرياض" },
    LookupItem { key: "jeddah", label_en: "Jeddah", label_ar: "جدة" },
    LookupItem { key: "dammam", label_en: "Dammam", label_ar: "الدمام" },
    LookupItem { key: "cairo", label_en: "Cairo", label_ar: "القاهرة" },
    LookupItem { key: "alexandria", label_en: "Alexandria", label_ar: "الإسكندرية" },
    LookupItem { key: "dubai", label_en: "Dubai", label_ar: "دبي" },
    LookupItem { key: "abu-dhabi", label_en: "Abu Dhabi", label_ar: "أبوظبي" },
    LookupItem { key: "amman", label_en: "Amman", label_ar: "عمّان" },
    LookupItem { key: "doha", label_en: "Doha", label_ar: "الدوحة" },
    LookupItem { key: "kuwait-city", label_en: "Kuwait City", label_ar: "مدينة الكويت" },
];

pub fn is_known(list: &[LookupItem], key: &str) -> bool {
    list.iter().any(|item| item.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_are_populated_and_bilingual() {
        for list in [JOB_CATEGORIES, JOB_TYPES, CITIES] {
            assert!(!list.is_empty());
            for item in list {
                assert!(!item.key.is_empty());
                assert!(!item.label_en.is_empty());
                assert!(!item.label_ar.is_empty());
            }
        }
    }

    #[test]
    fn test_keys_are_unique_kebab_case() {
        for list in [JOB_CATEGORIES, JOB_TYPES, CITIES] {
            for (i, item) in list.iter().enumerate() {
                assert!(
                    item.key
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                    "bad key {}",
                    item.key
                );
                assert!(!list[i + 1..].iter().any(|other| other.key == item.key));
            }
        }
    }

    #[test]
    fn test_is_known() {
        assert!(is_known(JOB_TYPES, "full-time"));
        assert!(!is_known(JOB_TYPES, "gig"));
        assert!(is_known(CITIES, "riyadh"));
        assert!(!is_known(CITIES, "atlantis"));
    }
}
