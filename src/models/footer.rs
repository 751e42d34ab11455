use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single footer document: contact block plus two ordered link lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FooterLink {
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub quick_links: Vec<QuickLink>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuickLink {
    pub id: Uuid,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialLink {
    pub id: Uuid,
    pub icon: String,
    pub url: String,
}

/// The three independently replaceable parts of the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterSection {
    Contact,
    QuickLinks,
    SocialLinks,
}

impl FooterSection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "contact" => Some(FooterSection::Contact),
            "quickLinks" => Some(FooterSection::QuickLinks),
            "socialLinks" => Some(FooterSection::SocialLinks),
            _ => None,
        }
    }
}

// PUT /api/footer-links/contact
#[derive(Debug, Default, Deserialize)]
pub struct ContactPatch {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

// PUT /api/footer-links/quickLinks
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickLinksPatch {
    pub quick_links: Option<Vec<QuickLinkInput>>,
}

// PUT /api/footer-links/socialLinks
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinksPatch {
    pub social_links: Option<Vec<SocialLinkInput>>,
}

/// A link as sent by the admin panel. `id` is kept only when it is a valid uuid.
#[derive(Debug, Deserialize)]
pub struct QuickLinkInput {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SocialLinkInput {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub url: String,
}
