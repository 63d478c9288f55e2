//! On-disk persistence round-trip for the events database.

use chrono::{Duration, TimeZone, Utc};
use cogload_core::{Event, EventCategory, EventsDb};

#[test]
fn events_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.db");

    let start = Utc.with_ymd_and_hms(2026, 8, 3, 9, 0, 0).unwrap();
    let mut event = Event::new("Standup", start, start + Duration::minutes(30)).unwrap();
    event.category = Some(EventCategory::Meeting);
    event.is_flexible = Some(true);
    event.calculated_cost = Some(3);

    {
        let db = EventsDb::open_at(&path).unwrap();
        db.insert_event(&event).unwrap();
    }

    let db = EventsDb::open_at(&path).unwrap();
    let events = db.list_events().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, event.id);
    assert_eq!(events[0].start_time, start);
    assert_eq!(events[0].category, Some(EventCategory::Meeting));
    assert_eq!(events[0].calculated_cost, Some(3));
}
