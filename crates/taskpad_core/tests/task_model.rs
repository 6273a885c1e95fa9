use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::thread;
use std::time::Duration;
use taskpad_core::{Task, TaskDraft, TaskValidationError};

fn draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        ..TaskDraft::default()
    }
}

#[test]
fn from_draft_sets_defaults_and_trims() {
    let task = Task::from_draft(&TaskDraft {
        title: "  Buy milk  ".to_string(),
        description: " two liters ".to_string(),
        ..TaskDraft::default()
    })
    .unwrap();

    assert!(!task.id.is_nil());
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, "two liters");
    assert_eq!(task.date, None);
    assert_eq!(task.time, None);
    assert_eq!(task.scheduled_at, None);
    assert_eq!(task.updated_at, None);
    assert!(!task.is_scheduled());
}

#[test]
fn empty_or_whitespace_title_is_rejected() {
    let err = Task::from_draft(&draft("")).unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);

    let err = Task::from_draft(&draft("   \t ")).unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);
}

#[test]
fn schedule_requires_both_date_and_time() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let time = NaiveTime::from_hms_opt(9, 30, 0).unwrap();

    let date_only = TaskDraft {
        date: Some(date),
        ..draft("dentist")
    };
    assert_eq!(date_only.scheduled_at(), None);

    let time_only = TaskDraft {
        time: Some(time),
        ..draft("dentist")
    };
    assert_eq!(time_only.scheduled_at(), None);

    let both = TaskDraft {
        date: Some(date),
        time: Some(time),
        ..draft("dentist")
    };
    let expected =
        NaiveDateTime::parse_from_str("2024-01-15T09:30:00", "%Y-%m-%dT%H:%M:%S").unwrap();
    assert_eq!(both.scheduled_at(), Some(expected));
}

#[test]
fn apply_draft_preserves_identity_and_refreshes_audit() {
    let mut task = Task::from_draft(&draft("first")).unwrap();
    let id = task.id;
    let created_at = task.created_at;

    // Clock granularity can be coarse; make sure the edit lands later.
    thread::sleep(Duration::from_millis(5));

    task.apply_draft(&TaskDraft {
        title: "second".to_string(),
        description: "now with details".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, 1),
        time: NaiveTime::from_hms_opt(8, 0, 0),
    })
    .unwrap();

    assert_eq!(task.id, id);
    assert_eq!(task.created_at, created_at);
    assert_eq!(task.title, "second");
    assert!(task.is_scheduled());

    let updated_at = task.updated_at.expect("edit must set updated_at");
    assert!(updated_at > created_at);
}

#[test]
fn apply_draft_with_blank_title_changes_nothing() {
    let mut task = Task::from_draft(&draft("keep me")).unwrap();
    let before = task.clone();

    let err = task.apply_draft(&draft(" ")).unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);
    assert_eq!(task, before);
}

#[test]
fn serialization_uses_camel_case_with_explicit_nulls() {
    let task = Task::from_draft(&draft("wire check")).unwrap();
    let json = serde_json::to_value(&task).unwrap();
    let object = json.as_object().unwrap();

    for key in [
        "id",
        "title",
        "description",
        "date",
        "time",
        "scheduledAt",
        "createdAt",
        "updatedAt",
    ] {
        assert!(object.contains_key(key), "missing wire field `{key}`");
    }

    assert_eq!(json["title"], "wire check");
    assert_eq!(json["date"], serde_json::Value::Null);
    assert_eq!(json["time"], serde_json::Value::Null);
    assert_eq!(json["scheduledAt"], serde_json::Value::Null);
    assert_eq!(json["updatedAt"], serde_json::Value::Null);

    let created_at = json["createdAt"].as_str().unwrap();
    assert!(
        chrono::DateTime::parse_from_rfc3339(created_at).is_ok(),
        "createdAt `{created_at}` is not RFC 3339"
    );
}

#[test]
fn scheduled_task_serializes_sortable_local_timestamp() {
    let task = Task::from_draft(&TaskDraft {
        date: NaiveDate::from_ymd_opt(2024, 1, 15),
        time: NaiveTime::from_hms_opt(9, 30, 0),
        ..draft("standup")
    })
    .unwrap();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["date"], "2024-01-15");
    assert_eq!(json["time"], "09:30:00");
    assert_eq!(json["scheduledAt"], "2024-01-15T09:30:00");
}

#[test]
fn wire_round_trip_preserves_record() {
    let mut task = Task::from_draft(&TaskDraft {
        title: "round trip".to_string(),
        description: "with schedule".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 12, 24),
        time: NaiveTime::from_hms_opt(18, 45, 0),
    })
    .unwrap();
    task.apply_draft(&TaskDraft {
        title: "round trip".to_string(),
        description: "with schedule".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 12, 24),
        time: NaiveTime::from_hms_opt(18, 45, 0),
    })
    .unwrap();

    let json = serde_json::to_string(&task).unwrap();
    let decoded: Task = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, task);
}
