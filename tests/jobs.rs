#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::io::Write;
    use tradelog::commands::share::select_job;
    use tradelog::libs::job::{Coordinates, Job, JobDraft, JobError, JobLog};

    fn draft(client_name: &str, date: (i32, u32, u32)) -> JobDraft {
        JobDraft {
            client_name: client_name.to_string(),
            address: "1 Station Road".to_string(),
            description: "Rewired consumer unit".to_string(),
            materials: String::new(),
            timestamp: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            time_in: "08:00".to_string(),
            time_out: "12:00".to_string(),
            coordinates: None,
        }
    }

    fn clients(log: &JobLog) -> Vec<&str> {
        log.jobs().iter().map(|job| job.client_name.as_str()).collect()
    }

    #[test]
    fn test_add_assigns_id_and_keeps_fields() {
        let mut log = JobLog::new();
        let job = log.add(draft("Alice", (2024, 3, 5))).unwrap().clone();

        assert!(!job.id.is_nil());
        assert_eq!(job.client_name, "Alice");
        assert_eq!(job.duration(), "4 hours");
        assert_eq!(job.display_date(), "3/5/2024");
        assert_eq!(job.iso_date(), "2024-03-05");
        assert_eq!(log.len(), 1);
        assert_eq!(log.get(job.id), Some(&job));
    }

    #[test]
    fn test_log_is_sorted_newest_first() {
        let mut log = JobLog::new();
        log.add(draft("March", (2024, 3, 5))).unwrap();
        log.add(draft("January", (2024, 1, 10))).unwrap();
        log.add(draft("June", (2024, 6, 1))).unwrap();

        assert_eq!(clients(&log), vec!["June", "March", "January"]);
        assert_eq!(log.jobs()[0].client_name, "June");
    }

    #[test]
    fn test_same_date_newest_addition_first() {
        let mut log = JobLog::new();
        log.add(draft("First", (2024, 3, 5))).unwrap();
        log.add(draft("Second", (2024, 3, 5))).unwrap();

        assert_eq!(clients(&log), vec!["Second", "First"]);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut log = JobLog::new();
        for _ in 0..20 {
            log.add(draft("Same", (2024, 3, 5))).unwrap();
        }
        let mut ids: Vec<_> = log.jobs().iter().map(|job| job.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_update_replaces_whole_record_and_resorts() {
        let mut log = JobLog::new();
        let old = log.add(draft("Old", (2024, 1, 1))).unwrap().clone();
        log.add(draft("Other", (2024, 2, 1))).unwrap();

        let edited = Job {
            client_name: "Edited".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            materials: "Cable".to_string(),
            ..old.clone()
        };
        log.update(edited.clone()).unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(clients(&log), vec!["Edited", "Other"]);
        assert_eq!(log.get(old.id), Some(&edited));
    }

    #[test]
    fn test_revise_keeps_id() {
        let job = Job::from_draft(draft("Alice", (2024, 3, 5))).unwrap();
        let mut changes = JobDraft::from(&job);
        changes.address = "9 Harbour View".to_string();

        let revised = job.revise(changes).unwrap();
        assert_eq!(revised.id, job.id);
        assert_eq!(revised.address, "9 Harbour View");
        assert_eq!(revised.client_name, "Alice");
    }

    #[test]
    fn test_edit_selected_job_from_sheet() {
        let mut seed = JobLog::new();
        seed.add(draft("Alice", (2024, 3, 5))).unwrap();
        seed.add(draft("Bob", (2024, 3, 6))).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(seed.jobs()).unwrap().as_bytes()).unwrap();

        let mut log = JobLog::from_sheet(file.path()).unwrap();
        let alice = log.jobs()[1].clone();
        let job = select_job(&log, Some(&alice.id.simple().to_string()[..8])).unwrap();
        assert_eq!(job, alice);

        let mut changes = JobDraft::from(&job);
        assert_eq!(changes.client_name, "Alice");
        assert_eq!(changes.timestamp, job.timestamp);
        changes.description = "Replaced consumer unit".to_string();
        changes.materials = "RCD  x2".to_string();
        changes.timestamp = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        changes.time_out = "13:30".to_string();

        let edited = log.edit(job.id, changes).unwrap().clone();
        assert_eq!(edited.id, job.id);
        assert_eq!(edited.description, "Replaced consumer unit");
        assert_eq!(edited.materials, "RCD  x2");
        assert_eq!(edited.duration(), "5 hours 30 minutes");
        assert_eq!(log.len(), 2);
        assert_eq!(clients(&log), vec!["Alice", "Bob"]);
        assert_eq!(log.get(job.id), Some(&edited));
    }

    #[test]
    fn test_invalid_edit_keeps_original() {
        let mut log = JobLog::new();
        let job = log.add(draft("Alice", (2024, 3, 5))).unwrap().clone();

        let mut changes = JobDraft::from(&job);
        changes.client_name.clear();
        assert!(matches!(log.edit(job.id, changes), Err(JobError::MissingFields)));
        assert_eq!(log.get(job.id), Some(&job));

        let other = Job::from_draft(draft("Ghost", (2024, 1, 1))).unwrap();
        assert!(matches!(log.edit(other.id, JobDraft::from(&other)), Err(JobError::NotFound(_))));
    }

    #[test]
    fn test_update_unknown_job_fails() {
        let mut log = JobLog::new();
        let job = Job::from_draft(draft("Ghost", (2024, 1, 1))).unwrap();
        assert!(matches!(log.update(job), Err(JobError::NotFound(_))));
    }

    #[test]
    fn test_required_fields() {
        let mut log = JobLog::new();
        for blank in ["client", "address", "description", "in", "out"] {
            let mut job = draft("Alice", (2024, 3, 5));
            match blank {
                "client" => job.client_name = " ".to_string(),
                "address" => job.address.clear(),
                "description" => job.description.clear(),
                "in" => job.time_in.clear(),
                _ => job.time_out.clear(),
            }
            assert!(matches!(log.add(job), Err(JobError::MissingFields)));
        }
        assert!(log.is_empty());
    }

    #[test]
    fn test_materials_are_optional() {
        let mut log = JobLog::new();
        let job = log.add(draft("Alice", (2024, 3, 5))).unwrap();
        assert!(!job.has_materials());
    }

    #[test]
    fn test_invalid_time_is_rejected() {
        let mut job = draft("Alice", (2024, 3, 5));
        job.time_out = "5pm".to_string();
        let err = JobLog::new().add(job).unwrap_err();
        assert!(matches!(err, JobError::InvalidTime { field: "time out", .. }));
    }

    #[test]
    fn test_sheet_round_trips_through_json() {
        let mut log = JobLog::new();
        let mut with_gps = draft("Gps", (2024, 4, 2));
        with_gps.coordinates = Some(Coordinates {
            latitude: 51.5,
            longitude: -0.12,
        });
        log.add(with_gps).unwrap();
        log.add(draft("Plain", (2024, 4, 1))).unwrap();

        let json = serde_json::to_string_pretty(log.jobs()).unwrap();
        assert!(json.contains("\"clientName\""));
        assert!(json.contains("\"timeIn\""));
        let loaded = JobLog::from_json(&json).unwrap();
        assert_eq!(loaded.jobs(), log.jobs());
    }

    #[test]
    fn test_sheet_with_single_job() {
        let json = r#"{
            "id": "6f1c2d3e-4a5b-4c6d-8e7f-8091a2b3c4d5",
            "clientName": "Bob",
            "address": "2 Quay Street",
            "description": "Unblocked drain",
            "timestamp": "2024-07-09",
            "timeIn": "13:00",
            "timeOut": "14:15"
        }"#;
        let log = JobLog::from_json(json).unwrap();
        let job = &log.jobs()[0];
        assert_eq!(job.client_name, "Bob");
        assert_eq!(job.materials, "");
        assert_eq!(job.coordinates, None);
        assert_eq!(job.duration(), "1 hour 15 minutes");
    }

    #[test]
    fn test_sheet_with_duplicate_ids_is_rejected() {
        let job = Job::from_draft(draft("Dup", (2024, 1, 1))).unwrap();
        let json = serde_json::to_string(&vec![job.clone(), job]).unwrap();
        assert!(matches!(JobLog::from_json(&json), Err(JobError::DuplicateId(_))));
    }

    #[test]
    fn test_from_sheet_reads_file() {
        let mut log = JobLog::new();
        log.add(draft("File", (2024, 8, 8))).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(log.jobs()).unwrap().as_bytes()).unwrap();

        let loaded = JobLog::from_sheet(file.path()).unwrap();
        assert_eq!(clients(&loaded), vec!["File"]);
        assert!(matches!(JobLog::from_sheet(&file.path().with_extension("missing")), Err(JobError::Io(_))));
    }

    #[test]
    fn test_matching_by_id_prefix() {
        let mut log = JobLog::new();
        let job = log.add(draft("Alice", (2024, 3, 5))).unwrap().clone();
        log.add(draft("Bob", (2024, 3, 6))).unwrap();

        let hyphenated = job.id.hyphenated().to_string();
        let simple = job.id.simple().to_string();
        assert_eq!(log.matching(&hyphenated), vec![&job]);
        assert_eq!(log.matching(&simple[..12]), vec![&job]);
        assert_eq!(log.matching(&hyphenated.to_uppercase()), vec![&job]);
        assert!(log.matching("").is_empty());
    }

    #[test]
    fn test_select_job() {
        let mut log = JobLog::new();
        assert!(select_job(&log, None).is_err());

        let alice = log.add(draft("Alice", (2024, 3, 5))).unwrap().clone();
        assert_eq!(select_job(&log, None).unwrap(), alice);

        log.add(draft("Bob", (2024, 3, 6))).unwrap();
        assert!(select_job(&log, None).is_err());
        assert_eq!(select_job(&log, Some(alice.id.to_string().as_str())).unwrap(), alice);
        assert!(select_job(&log, Some("zzzz")).is_err());
    }
}
