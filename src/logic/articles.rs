//! Article-From-Incident Generator
//!
//! Synthesizes a draft knowledge-base article from an incident's analysis:
//! summary, root causes with probabilities, and recommendations with
//! priorities, rendered as markdown.

use crate::entities::{ArticleCategory, ArticleStatus, Dao, Incident, KnowledgeBaseArticle};
use crate::error::StoreResult;
use crate::logic::analyzer::{self, Analysis};
use crate::store::RecordStore;

fn render_markdown(incident: &Incident, analysis: &Analysis) -> String {
    let mut content = String::new();
    content.push_str(&format!("# {}\n\n", incident.title));
    content.push_str(&format!("## Summary\n\n{}\n\n", analysis.summary));

    content.push_str("## Root Causes\n\n");
    for cause in &analysis.root_causes {
        content.push_str(&format!(
            "- {} (probability {:.0}%)\n",
            cause.cause,
            cause.probability * 100.0
        ));
    }

    content.push_str("\n## Recommendations\n\n");
    for rec in &analysis.recommendations {
        content.push_str(&format!("- **{}**: {}\n", rec.priority, rec.action));
    }

    content.push_str(&format!(
        "\n## Recovery\n\nEstimated recovery time: {}\n",
        analysis.estimated_recovery_time
    ));
    content
}

/// Create a draft article from the incident's analysis (computed on the fly
/// when the incident has none stored).
pub fn generate_article_from_incident(
    store: &mut RecordStore,
    incident_id: &str,
) -> StoreResult<KnowledgeBaseArticle> {
    let incident = Dao::<Incident>::get(store, incident_id)?;
    let analysis = match &incident.ai_analysis {
        Some(analysis) => analysis.clone(),
        None => analyzer::analyze(&incident),
    };
    let author = crate::identity::current_user(store).full_name;

    let mut tags: Vec<String> = incident
        .affected_systems
        .iter()
        .map(|s| s.to_lowercase())
        .collect();
    tags.push(incident.severity.as_str().to_string());

    let article = KnowledgeBaseArticle {
        title: format!("Postmortem notes: {}", incident.title),
        summary: analysis.summary.clone(),
        content: render_markdown(&incident, &analysis),
        category: ArticleCategory::Postmortem,
        tags,
        related_systems: incident.affected_systems.clone(),
        status: ArticleStatus::Draft,
        author,
        ..Default::default()
    };

    Dao::<KnowledgeBaseArticle>::create(store, &article)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Severity;

    #[test]
    fn test_article_created_as_draft_with_markdown_sections() {
        let mut store = RecordStore::in_memory();
        let incident = Dao::<Incident>::create(
            &mut store,
            &Incident {
                title: "DB outage".to_string(),
                description: "Postgres connection timeouts across checkout".to_string(),
                severity: Severity::Critical,
                affected_systems: vec!["Postgres Primary".to_string()],
                ..Default::default()
            },
        )
        .unwrap();

        let article =
            generate_article_from_incident(&mut store, incident.id.as_deref().unwrap()).unwrap();

        assert_eq!(article.status, ArticleStatus::Draft);
        assert_eq!(article.category, ArticleCategory::Postmortem);
        assert!(article.content.contains("# DB outage"));
        assert!(article.content.contains("## Root Causes"));
        assert!(article.content.contains("(probability 60%)"));
        assert!(article.tags.contains(&"critical".to_string()));
        assert!(article.id.is_some());
    }
}
