//! Store Seeding
//!
//! First-run seeding of the knowledge base so the suggestion generator has
//! candidates before anyone writes an article. Idempotent: guarded by the
//! persisted `seeded` flag.

use crate::entities::{ArticleCategory, ArticleStatus, Dao, KnowledgeBaseArticle};
use crate::error::StoreResult;
use crate::store::RecordStore;

fn playbooks() -> Vec<KnowledgeBaseArticle> {
    let article = |title: &str,
                   summary: &str,
                   category: ArticleCategory,
                   tags: &[&str],
                   systems: &[&str],
                   content: &str| KnowledgeBaseArticle {
        title: title.to_string(),
        summary: summary.to_string(),
        content: content.to_string(),
        category,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        related_systems: systems.iter().map(|s| s.to_string()).collect(),
        status: ArticleStatus::Published,
        author: "Incident Desk".to_string(),
        ..Default::default()
    };

    vec![
        article(
            "SSO and login failure triage",
            "Troubleshooting login errors, token refresh failures and identity provider callbacks",
            ArticleCategory::Troubleshooting,
            &["auth", "sso", "identity", "login"],
            &["Auth Service"],
            "# SSO and login failure triage\n\nStart with the identity provider status page, \
             then verify token signing keys and callback URLs.\n",
        ),
        article(
            "Datastore connection pool runbook",
            "Diagnosing connection pool exhaustion, query timeouts and replication lag",
            ArticleCategory::Runbook,
            &["database", "postgres", "timeout", "pool"],
            &["Postgres Primary"],
            "# Datastore connection pool runbook\n\nCheck pool utilization, the slow-query log, \
             and recent schema migrations before resizing anything.\n",
        ),
        article(
            "Gateway error-rate investigation",
            "Investigating elevated 5xx rates, upstream latency and retry amplification at the edge",
            ArticleCategory::Runbook,
            &["api", "gateway", "latency", "5xx"],
            &["API Gateway"],
            "# Gateway error-rate investigation\n\nCompare error rates per upstream, then check \
             timeout budgets and recent deploys.\n",
        ),
    ]
}

/// Seed the knowledge base once. Returns true when seeding ran.
pub fn ensure_seeded(store: &mut RecordStore) -> StoreResult<bool> {
    if store.meta().seeded {
        return Ok(false);
    }

    for playbook in playbooks() {
        Dao::<KnowledgeBaseArticle>::create(store, &playbook)?;
    }
    store.set_seeded(true);
    log::info!("Knowledge base seeded with starter playbooks");
    Ok(true)
}
