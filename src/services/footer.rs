use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::db::FooterRepository;
use crate::error::{AppError, AppResult};
use crate::models::footer::{
    Contact, ContactPatch, FooterLink, FooterSection, QuickLink, QuickLinksPatch, SocialLink,
    SocialLinksPatch,
};

/// The footer singleton, or an empty document when none has been saved yet.
pub async fn get<F: FooterRepository + ?Sized>(repo: &F) -> AppResult<FooterLink> {
    Ok(repo.get_footer().await?.unwrap_or_default())
}

/// Replace one section of the existing footer.
///
/// `contact` merges field by field; the link lists are replaced wholesale
/// when present in the payload and left alone otherwise.
pub async fn patch<F: FooterRepository + ?Sized>(
    repo: &F,
    section: &str,
    payload: Value,
) -> AppResult<FooterLink> {
    let section =
        FooterSection::parse(section).ok_or_else(|| AppError::validation("Invalid section"))?;

    let mut footer = repo
        .get_footer()
        .await?
        .ok_or(AppError::NotFound("Footer data"))?;

    match section {
        FooterSection::Contact => {
            let update: ContactPatch = parse_payload(payload)?;
            footer.contact = merge_contact(footer.contact, update);
        }
        FooterSection::QuickLinks => {
            let update: QuickLinksPatch = parse_payload(payload)?;
            if let Some(links) = update.quick_links {
                footer.quick_links = links
                    .into_iter()
                    .map(|link| QuickLink {
                        id: keep_or_new_id(link.id.as_deref()),
                        name: link.name,
                        url: link.url,
                    })
                    .collect();
            }
        }
        FooterSection::SocialLinks => {
            let update: SocialLinksPatch = parse_payload(payload)?;
            if let Some(links) = update.social_links {
                footer.social_links = links
                    .into_iter()
                    .map(|link| SocialLink {
                        id: keep_or_new_id(link.id.as_deref()),
                        icon: link.icon,
                        url: link.url,
                    })
                    .collect();
            }
        }
    }

    repo.save_footer(&footer).await?;
    tracing::info!(?section, "Footer section updated");
    Ok(footer)
}

fn parse_payload<T: DeserializeOwned>(payload: Value) -> AppResult<T> {
    serde_json::from_value(payload)
        .map_err(|e| AppError::validation(format!("Invalid payload: {e}")))
}

fn merge_contact(current: Contact, update: ContactPatch) -> Contact {
    Contact {
        phone: update.phone.or(current.phone),
        email: update.email.or(current.email),
        address: update.address.or(current.address),
    }
}

fn keep_or_new_id(raw: Option<&str>) -> Uuid {
    raw.and_then(|id| Uuid::parse_str(id).ok())
        .unwrap_or_else(Uuid::new_v4)
}
