//! # Bilingual Strings
//!
//! English and Hindi label tables. A lookup tries the selected language, then
//! English, then returns the key unchanged.

use crate::model::Unit;
use crate::storage::{keys, KvStore, StorageError};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    /// The persisted language. Missing or unrecognised values mean English.
    pub fn load(store: &KvStore) -> Result<Self, StorageError> {
        let stored: Option<String> = store.get_item(keys::LANGUAGE)?;
        Ok(match stored {
            None => Language::En,
            Some(code) => code.parse().unwrap_or_else(|_| {
                warn!(%code, "Unknown stored language, using English");
                Language::En
            }),
        })
    }

    pub fn save(self, store: &KvStore) -> Result<(), StorageError> {
        store.set_item(keys::LANGUAGE, self.code())
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language '{0}' (expected en or hi)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "hi" => Ok(Language::Hi),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

type Table = &'static [(&'static str, &'static str)];

const EN: Table = &[
    ("appTitle", "Stockroom"),
    ("welcomeSubtitle", "Track your shop's stock"),
    ("login", "Login"),
    ("logout", "Logout"),
    ("createAccount", "Create Account"),
    ("loggedInAs", "Logged in as"),
    ("loggedOut", "Logged out"),
    ("notLoggedIn", "Not logged in"),
    ("ownerName", "Owner Name"),
    ("shopName", "Shop Name"),
    ("shopAddress", "Shop Address"),
    ("shopCategory", "Shop Category"),
    ("emailId", "Email ID"),
    ("password", "Password"),
    ("invalidCredentials", "Invalid email or password"),
    ("allFieldsRequired", "All fields are required"),
    ("forgotPassword", "Forgot Password"),
    ("codeSent", "A verification code has been sent"),
    ("codeHint", "Use code 1234 for demo"),
    ("invalidCode", "Invalid code"),
    ("productName", "Product Name"),
    ("productAdded", "Product added"),
    ("deleteProduct", "Delete Product"),
    ("previousQty", "Previous Qty"),
    ("currentQty", "Current Qty"),
    ("unit", "Unit"),
    ("expiryDate", "Expiry Date"),
    ("expiryAlertDays", "Expiry Alert Days"),
    ("clearExpiry", "Clear Expiry"),
    ("noProducts", "No products yet"),
    ("noProductsDesc", "Add your first product to start tracking"),
    ("settings", "Settings"),
    ("lowStockPercent", "Low Stock Alert (%)"),
    ("noChangeDays", "No Change Alert (days)"),
    ("saved", "Saved"),
    ("language", "Language"),
    ("english", "English"),
    ("hindi", "Hindi"),
    ("alertExpiring", "Expiring"),
    ("alertLowStock", "Low stock"),
    ("alertStale", "No change"),
    ("unitPcs", "Pieces"),
    ("unitKg", "Kilogram"),
    ("unitLiter", "Liter"),
    ("unitMeter", "Meter"),
    ("unitBox", "Box"),
];

const HI: Table = &[
    ("appTitle", "स्टॉकरूम"),
    ("welcomeSubtitle", "अपनी दुकान का स्टॉक ट्रैक करें"),
    ("login", "लॉगिन"),
    ("logout", "लॉगआउट"),
    ("createAccount", "खाता बनाएं"),
    ("loggedInAs", "लॉगिन किया गया"),
    ("loggedOut", "लॉगआउट हो गया"),
    ("notLoggedIn", "लॉगिन नहीं है"),
    ("ownerName", "मालिक का नाम"),
    ("shopName", "दुकान का नाम"),
    ("shopAddress", "दुकान का पता"),
    ("shopCategory", "दुकान की श्रेणी"),
    ("emailId", "ईमेल आईडी"),
    ("password", "पासवर्ड"),
    ("invalidCredentials", "गलत ईमेल या पासवर्ड"),
    ("allFieldsRequired", "सभी फ़ील्ड आवश्यक हैं"),
    ("forgotPassword", "पासवर्ड भूल गए"),
    ("codeSent", "सत्यापन कोड भेजा गया है"),
    ("codeHint", "डेमो के लिए कोड 1234 का उपयोग करें"),
    ("invalidCode", "गलत कोड"),
    ("productName", "उत्पाद का नाम"),
    ("productAdded", "उत्पाद जोड़ा गया"),
    ("deleteProduct", "उत्पाद हटाएं"),
    ("previousQty", "पिछली मात्रा"),
    ("currentQty", "वर्तमान मात्रा"),
    ("unit", "इकाई"),
    ("expiryDate", "समाप्ति तिथि"),
    ("expiryAlertDays", "समाप्ति चेतावनी (दिन)"),
    ("clearExpiry", "समाप्ति हटाएं"),
    ("noProducts", "अभी कोई उत्पाद नहीं"),
    ("noProductsDesc", "ट्रैकिंग शुरू करने के लिए पहला उत्पाद जोड़ें"),
    ("settings", "सेटिंग्स"),
    ("lowStockPercent", "कम स्टॉक चेतावनी (%)"),
    ("noChangeDays", "कोई बदलाव नहीं चेतावनी (दिन)"),
    ("saved", "सहेजा गया"),
    ("language", "भाषा"),
    ("english", "अंग्रेज़ी"),
    ("hindi", "हिंदी"),
    ("alertExpiring", "समाप्त हो रहा है"),
    ("alertLowStock", "कम स्टॉक"),
    ("alertStale", "कोई बदलाव नहीं"),
    ("unitPcs", "पीस"),
    ("unitKg", "किलोग्राम"),
    ("unitLiter", "लीटर"),
    ("unitMeter", "मीटर"),
    ("unitBox", "डिब्बा"),
];

fn table(language: Language) -> Table {
    match language {
        Language::En => EN,
        Language::Hi => HI,
    }
}

fn lookup<'a>(table: Table, key: &str) -> Option<&'a str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Translation key for a unit's display name.
pub fn unit_key(unit: Unit) -> &'static str {
    match unit {
        Unit::Pieces => "unitPcs",
        Unit::Kilogram => "unitKg",
        Unit::Liter => "unitLiter",
        Unit::Meter => "unitMeter",
        Unit::Box => "unitBox",
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Returns the label for `key`. Never fails: unknown keys come back as-is.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        lookup(table(self.language), key)
            .or_else(|| lookup(EN, key))
            .unwrap_or(key)
    }
}
