//! Fixed demo data for the `/api/sample-data` endpoint.
//!
//! Seeding is idempotent: if any conversation already exists the seeder
//! no-ops, so calling it twice leaves the same row counts as calling it once.

use chrono::Utc;
use tracing::info;

use crate::error::Result;
use crate::models::{ContextRecord, MessageRole};
use crate::store::ConversationStore;

#[derive(Debug, Clone)]
pub struct SeedReport {
    pub seeded: bool,
    pub conversations: usize,
}

struct SampleConversation {
    messages: &'static [(MessageRole, &'static str)],
    summary: &'static str,
    tags: &'static [&'static str],
}

const SAMPLE_CONVERSATIONS: &[SampleConversation] = &[
    // "AI Development Discussion"
    SampleConversation {
        messages: &[
            (
                MessageRole::User,
                "What are the biggest risks in AI development right now?",
            ),
            (
                MessageRole::Assistant,
                "The main concerns are alignment (systems pursuing goals their \
                 operators did not intend), misuse of capable models, and the pace \
                 of deployment outrunning safety evaluation.",
            ),
            (
                MessageRole::User,
                "How do ethics boards fit into that picture?",
            ),
            (
                MessageRole::Assistant,
                "Ethics boards review high-impact launches, set internal policy for \
                 data use and model behavior, and act as an escalation point when \
                 product goals conflict with safety commitments.",
            ),
        ],
        summary: "AI Development Discussion: risks in current AI development and \
                  the role of ethics review in mitigating them.",
        tags: &["ai", "ethics", "safety", "development"],
    },
    SampleConversation {
        messages: &[
            (
                MessageRole::User,
                "I have a week in Italy in October. Rome and Florence, or just one city?",
            ),
            (
                MessageRole::Assistant,
                "A week comfortably covers both: four nights in Rome, three in \
                 Florence, connected by a 90-minute train. October crowds are \
                 lighter and museum tickets easier to book.",
            ),
            (
                MessageRole::User,
                "What should I book in advance?",
            ),
            (
                MessageRole::Assistant,
                "The Vatican Museums, the Uffizi, and the Accademia all sell out; \
                 book those before you fly. Restaurants outside tourist centers \
                 rarely need reservations.",
            ),
        ],
        summary: "Planning a one-week October trip to Italy split between Rome and \
                  Florence, with advance-booking advice.",
        tags: &["travel", "italy", "planning"],
    },
    SampleConversation {
        messages: &[
            (
                MessageRole::User,
                "Should I use a surrogate key or a natural key for a users table?",
            ),
            (
                MessageRole::Assistant,
                "Default to a surrogate key. Natural keys like email addresses \
                 change, and propagating that change through foreign keys is \
                 expensive. Keep the natural candidate unique-indexed instead.",
            ),
            (
                MessageRole::User,
                "And for indexing the lookup columns?",
            ),
            (
                MessageRole::Assistant,
                "Index the columns your queries filter and join on, watch for \
                 redundant prefixes of composite indexes, and measure with the \
                 query planner before adding more.",
            ),
        ],
        summary: "Database schema design: surrogate versus natural keys and \
                  practical indexing guidance.",
        tags: &["databases", "schema", "indexing"],
    },
];

/// Seed the store with the fixed demo set unless data already exists.
pub async fn seed_sample_data(store: &dyn ConversationStore) -> Result<SeedReport> {
    if store.has_conversations().await? {
        info!("Sample data skipped: conversations already exist");
        return Ok(SeedReport {
            seeded: false,
            conversations: 0,
        });
    }

    for sample in SAMPLE_CONVERSATIONS {
        let conversation_id = store.create_conversation().await?;

        for (role, content) in sample.messages {
            store.insert_message(&conversation_id, *role, content).await?;
        }

        let raw_conversation = sample
            .messages
            .iter()
            .map(|(_, content)| *content)
            .collect::<Vec<_>>()
            .join("\n\n");

        store
            .upsert_context(ContextRecord {
                conversation_id,
                summary: sample.summary.to_string(),
                key_terms: sample.tags.iter().map(|t| t.to_string()).collect(),
                tags: sample.tags.iter().map(|t| t.to_string()).collect(),
                raw_conversation,
                created_at: Utc::now(),
            })
            .await?;
    }

    info!("Seeded {} sample conversations", SAMPLE_CONVERSATIONS.len());
    Ok(SeedReport {
        seeded: true,
        conversations: SAMPLE_CONVERSATIONS.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_sample_carries_the_ethics_tag() {
        let matches: Vec<_> = SAMPLE_CONVERSATIONS
            .iter()
            .filter(|s| s.tags.contains(&"ethics"))
            .collect();
        assert_eq!(matches.len(), 1);
        assert!(matches[0].summary.contains("AI Development Discussion"));
    }

    #[test]
    fn samples_are_well_formed() {
        for sample in SAMPLE_CONVERSATIONS {
            // Enough turns to cross the summarization threshold
            assert!(sample.messages.len() >= 3);
            assert!(!sample.summary.is_empty());
            assert!(!sample.tags.is_empty());
            // Tags are already normalized: lowercase, trimmed
            for tag in sample.tags {
                assert_eq!(*tag, tag.trim().to_lowercase());
            }
        }
    }
}
