//! Demo catalog loaded into an empty database on first start.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::db::DatabaseBackend;
use crate::error::{CampusError, Result};
use crate::models::{Event, UserProfile};

/// The demo student every fresh install signs in as.
pub const DEMO_USER_ID: &str = "user-1";

struct EventSeed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    date: &'static str,
    tags: &'static [&'static str],
    image: &'static str,
}

struct UserSeed {
    uid: &'static str,
    display_name: &'static str,
    email: &'static str,
    photo_url: &'static str,
    interests: &'static [&'static str],
    bookmarks: &'static [&'static str],
}

const EVENTS: &[EventSeed] = &[
    EventSeed {
        id: "event-1",
        title: "AI in Healthcare Hackathon",
        description: "Join us for a weekend of innovation, creating AI solutions to revolutionize healthcare.",
        date: "2024-10-26T09:00:00Z",
        tags: &["Machine Learning", "Healthcare"],
        image: "https://images.unsplash.com/photo-1588200908342-23b585c03e26?q=80&w=600&h=400&auto=format&fit=crop",
    },
    EventSeed {
        id: "event-2",
        title: "Full-Stack Web Dev Workshop",
        description: "A comprehensive workshop covering React, Node.js, and everything in between.",
        date: "2024-11-05T10:00:00Z",
        tags: &["Web Development", "JavaScript"],
        image: "https://images.unsplash.com/photo-1542831371-29b0f74f9713?q=80&w=600&h=400&auto=format&fit=crop",
    },
    EventSeed {
        id: "event-3",
        title: "Data Science Conclave",
        description: "Hear from industry experts about the latest trends in data science and big data.",
        date: "2024-11-12T11:00:00Z",
        tags: &["Data Science", "Python"],
        image: "https://images.unsplash.com/photo-1551288049-bebda4e38f71?q=80&w=600&h=400&auto=format&fit=crop",
    },
    EventSeed {
        id: "event-4",
        title: "Intro to Quantum Computing",
        description: "A beginner-friendly session on the principles of quantum computing.",
        date: "2024-11-18T14:00:00Z",
        tags: &["Physics", "Computer Science"],
        image: "https://images.unsplash.com/photo-1635070045099-2f2c39513333?q=80&w=600&h=400&auto=format&fit=crop",
    },
];

const USERS: &[UserSeed] = &[
    UserSeed {
        uid: DEMO_USER_ID,
        display_name: "Alex Doe",
        email: "alex.doe@example.com",
        photo_url: "https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?q=80&w=100&h=100&auto=format&fit=crop",
        interests: &["Machine Learning", "Web Development", "Python"],
        bookmarks: &["event-1", "event-3"],
    },
    UserSeed {
        uid: "user-2",
        display_name: "Jane Smith",
        email: "jane.smith@example.com",
        photo_url: "https://images.unsplash.com/photo-1494790108377-be9c29b29330?q=80&w=100&h=100&auto=format&fit=crop",
        interests: &["Web Development", "UI/UX Design", "JavaScript"],
        bookmarks: &[],
    },
    UserSeed {
        uid: "user-3",
        display_name: "Sam Wilson",
        email: "sam.wilson@example.com",
        photo_url: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?q=80&w=100&h=100&auto=format&fit=crop",
        interests: &["Data Science", "Python", "Machine Learning"],
        bookmarks: &[],
    },
    UserSeed {
        uid: "user-4",
        display_name: "Maria Garcia",
        email: "maria.garcia@example.com",
        photo_url: "https://images.unsplash.com/photo-1580489944761-15a19d654956?q=80&w=100&h=100&auto=format&fit=crop",
        interests: &["Mobile Development", "iOS", "Swift"],
        bookmarks: &[],
    },
    UserSeed {
        uid: "user-5",
        display_name: "Kenji Tanaka",
        email: "kenji.tanaka@example.com",
        photo_url: "https://images.unsplash.com/photo-1544005313-94ddf0286df2?q=80&w=100&h=100&auto=format&fit=crop",
        interests: &["Game Development", "C++", "Unity"],
        bookmarks: &[],
    },
    UserSeed {
        uid: "user-6",
        display_name: "Fatima Al-Fassi",
        email: "fatima.alfassi@example.com",
        photo_url: "https://images.unsplash.com/photo-1554151228-14d9def656e4?q=80&w=100&h=100&auto=format&fit=crop",
        interests: &["Cybersecurity", "Networking", "Python"],
        bookmarks: &[],
    },
];

/// How many rows a seeding pass inserted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub events: usize,
    pub users: usize,
}

pub fn demo_events() -> Result<Vec<Event>> {
    EVENTS
        .iter()
        .map(|seed| {
            let date = DateTime::parse_from_rfc3339(seed.date)
                .map_err(|e| CampusError::Internal(format!("Bad seed date {}: {e}", seed.date)))?
                .with_timezone(&Utc);
            Ok(Event {
                id: seed.id.to_string(),
                title: seed.title.to_string(),
                description: seed.description.to_string(),
                date,
                event_url: "#".to_string(),
                tags: seed.tags.iter().map(|t| t.to_string()).collect(),
                image: seed.image.to_string(),
            })
        })
        .collect()
}

pub fn demo_users() -> Vec<UserProfile> {
    USERS
        .iter()
        .map(|seed| UserProfile {
            uid: seed.uid.to_string(),
            display_name: Some(seed.display_name.to_string()),
            email: Some(seed.email.to_string()),
            photo_url: Some(seed.photo_url.to_string()),
            interest_tags: seed.interests.iter().map(|t| t.to_string()).collect(),
            bookmarked_events: seed.bookmarks.iter().map(|t| t.to_string()).collect::<HashSet<_>>(),
        })
        .collect()
}

/// Insert the demo catalog into whichever of the event and user tables is
/// empty. Tables that already hold rows are left untouched.
pub async fn seed_demo_catalog(backend: &dyn DatabaseBackend) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    // events first; bookmarks reference them
    if backend.list_events().await?.is_empty() {
        for event in demo_events()? {
            backend.upsert_event(&event).await?;
            report.events += 1;
        }
    }

    if backend.list_users().await?.is_empty() {
        let known: HashSet<String> = backend
            .list_events()
            .await?
            .into_iter()
            .map(|event| event.id)
            .collect();

        for mut user in demo_users() {
            // a pre-existing catalog may not carry the demo events
            user.bookmarked_events.retain(|id| known.contains(id));
            backend.upsert_user(&user).await?;
            report.users += 1;
        }
    }

    if report != SeedReport::default() {
        tracing::info!(
            events = report.events,
            users = report.users,
            "Seeded demo catalog"
        );
    }

    Ok(report)
}
