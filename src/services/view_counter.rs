use anyhow::Result;
use mongodb::bson::oid::ObjectId;

use crate::db::repositories::NewsRepository;
use crate::models::news::News;

#[derive(Debug)]
pub enum VisitOutcome {
    /// First visit from this IP; the post as stored after the increment.
    Counted(News),
    /// The IP was already recorded; the post is unchanged.
    AlreadyCounted(News),
    NotFound,
}

/// Count a visit from `client_ip` at most once per post.
pub async fn record_visit(
    repo: &dyn NewsRepository,
    id: &ObjectId,
    client_ip: &str,
) -> Result<VisitOutcome> {
    if let Some(updated) = repo.record_visit(id, client_ip).await? {
        return Ok(VisitOutcome::Counted(updated));
    }

    // The conditional update matched nothing: tell an unknown id apart from a repeat visit.
    Ok(match repo.find_by_id(id).await? {
        Some(news) => VisitOutcome::AlreadyCounted(news),
        None => VisitOutcome::NotFound,
    })
}
