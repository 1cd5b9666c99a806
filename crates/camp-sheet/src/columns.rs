use std::str::FromStr;

/// Header language of generated spreadsheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl Locale {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
        }
    }
}

impl FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Self::Ar),
            "en" => Ok(Self::En),
            _ => Err(()),
        }
    }
}

/// One spreadsheet column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Stable key, identical to the JSON field name
    pub key: &'static str,
    pub label_en: &'static str,
    pub label_ar: &'static str,
    pub required: bool,
}

impl Column {
    const fn required(key: &'static str, label_en: &'static str, label_ar: &'static str) -> Self {
        Self { key, label_en, label_ar, required: true }
    }

    const fn optional(key: &'static str, label_en: &'static str, label_ar: &'static str) -> Self {
        Self { key, label_en, label_ar, required: false }
    }

    pub const fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Ar => self.label_ar,
            Locale::En => self.label_en,
        }
    }

    /// Header cells match the key or either label, ignoring case and whitespace
    pub fn matches_header(&self, header: &str) -> bool {
        let header = squash(header);
        if header.is_empty() {
            return false;
        }
        [self.key, self.label_en, self.label_ar]
            .iter()
            .any(|candidate| squash(candidate) == header)
    }
}

fn squash(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

pub const CHILD_COLUMNS: &[Column] = &[
    Column::required("fullName", "Full Name", "الاسم الكامل"),
    Column::required("idNumber", "ID Number", "رقم الهوية"),
    Column::required("dateOfBirth", "Date of Birth", "تاريخ الميلاد"),
    Column::required("gender", "Gender", "الجنس"),
    Column::required("healthStatus", "Health Status", "الحالة الصحية"),
    Column::required("fatherName", "Father Name", "اسم الأب"),
    Column::required("fatherId", "Father ID", "رقم هوية الأب"),
    Column::required("motherName", "Mother Name", "اسم الأم"),
    Column::required("motherId", "Mother ID", "رقم هوية الأم"),
    Column::optional("isBreastfeeding", "Breastfeeding", "رضاعة طبيعية"),
    Column::optional("healthNotes", "Health Notes", "ملاحظات صحية"),
    Column::optional("camp", "Camp", "المخيم"),
];

pub const PREGNANT_WOMAN_COLUMNS: &[Column] = &[
    Column::required("fullName", "Full Name", "الاسم الكامل"),
    Column::required("idNumber", "ID Number", "رقم الهوية"),
    Column::required("healthStatus", "Health Status", "الحالة الصحية"),
    Column::required("pregnancyMonth", "Pregnancy Month", "شهر الحمل"),
    Column::required("spouseName", "Husband Name", "اسم الزوج"),
    Column::required("spouseId", "Husband ID", "رقم هوية الزوج"),
    Column::optional("healthNotes", "Health Notes", "ملاحظات صحية"),
    Column::optional("camp", "Camp", "المخيم"),
];
