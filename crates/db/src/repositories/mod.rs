//! Repository layer for database CRUD operations.
//!
//! Each repository is a zero-sized struct with async methods that accept
//! a `&PgPool` (or executor). Entity repositories implement
//! [`Entity`](crate::entity::Entity) so [`CrudRepo`] can serve their
//! generic reads and writes.

pub mod audit_repo;
pub mod blog_repo;
pub mod club_image_repo;
pub mod club_repo;
pub mod crud_repo;
pub mod member_repo;
pub mod news_repo;
pub mod partner_repo;
pub mod project_repo;
pub mod stat_repo;
pub mod tag_repo;
pub mod user_repo;
pub mod win_repo;

pub use audit_repo::AuditRepo;
pub use blog_repo::BlogRepo;
pub use club_image_repo::ClubImageRepo;
pub use club_repo::ClubRepo;
pub use crud_repo::CrudRepo;
pub use member_repo::MemberRepo;
pub use news_repo::NewsRepo;
pub use partner_repo::PartnerRepo;
pub use project_repo::ProjectRepo;
pub use stat_repo::StatRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
pub use win_repo::WinRepo;

/// `None` for absent or whitespace-only text.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Slug for an insert: the supplied slug if any, else the title.
pub(crate) fn slug_for_insert(slug: Option<&str>, title: &str) -> String {
    itam_core::slug::generate(non_blank(slug).unwrap_or(title))
}

/// Slug for an update. A blank slug is regenerated from the (new or current)
/// title; an absent slug is left alone.
pub(crate) fn slug_for_update(
    slug: Option<&str>,
    new_title: Option<&str>,
    current_title: &str,
) -> Option<String> {
    let slug = slug?;
    let source = non_blank(Some(slug))
        .or_else(|| non_blank(new_title))
        .unwrap_or(current_title);
    Some(itam_core::slug::generate(source))
}
