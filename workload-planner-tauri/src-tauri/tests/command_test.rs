#[cfg(test)]
mod command_tests {
    use tauri::Manager;

    use workload_ledger::ledger::SlotCandidate;
    use workload_ledger::model::{JobStatus, Role, User};

    use workload_planner_tauri_lib::{
        application::commands::*,
        domain::job_logic::JobDraft,
        infrastructure::snapshot_repo::SnapshotRepository,
        AppServices,
    };

    fn setup_app() -> (tauri::App<tauri::test::MockRuntime>, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = SnapshotRepository::open(dir.path().join("planner-data.json"))
            .expect("Failed to open snapshot");

        let app = tauri::test::mock_builder()
            .manage(AppServices::new(store))
            .build(tauri::generate_context!())
            .unwrap();
        (app, dir)
    }

    fn candidate(week: &str, day: &str, start: &str, end: &str) -> SlotCandidate {
        SlotCandidate {
            week: week.to_string(),
            day: day.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_full_scenario_from_ui() {
        // 1. モックアプリ起動（テスト用ディレクトリにシードされる）
        let (app, _dir) = setup_app();
        let state = app.state::<AppServices>();

        // 2. [コマンド実行] スタッフとしてログイン
        let session = login("staff".to_string(), "staff123".to_string(), state.clone()).unwrap();
        assert_eq!(session.role, Role::Staff);
        assert_eq!(session.profile_id.as_deref(), Some("staffA"));

        // 3. [コマンド実行] マネージャ画面の稼働一覧
        let rows = list_workload_rows(state.clone()).unwrap();
        assert_eq!(rows.len(), 3);
        let alice = rows.iter().find(|row| row.staff_id == "staffA").unwrap();
        assert_eq!(alice.assigned_jobs, 1); // シードで JOB-2 が割当済み

        // 4. [コマンド実行] 仕事の作成と割当
        let job_id = create_job(
            JobDraft {
                title: "Evening restock".to_string(),
                date: "2026-01-12".to_string(),
                duration: 3.0,
                location: "North depot".to_string(),
                description: String::new(),
            },
            state.clone(),
        )
        .unwrap();
        assert_eq!(job_id, "JOB-4"); // シードは JOB-1..3

        allocate_job(job_id.clone(), "staffA".to_string(), state.clone()).unwrap();

        // 適格でないスタッフへの割当は弾かれる
        let unassigned = create_job(
            JobDraft {
                title: "Spare shift".to_string(),
                date: "2026-01-13".to_string(),
                duration: 2.0,
                location: String::new(),
                description: String::new(),
            },
            state.clone(),
        )
        .unwrap();
        let r = allocate_job(unassigned.clone(), "staffC".to_string(), state.clone());
        assert!(r.is_err());

        // 5. [コマンド実行] 受諾と辞退
        accept_assignment(job_id.clone(), "staffA".to_string(), state.clone()).unwrap();
        let assignments = list_assignments("staffA".to_string(), state.clone()).unwrap();
        let accepted = assignments.iter().find(|job| job.id == job_id).unwrap();
        assert_eq!(accepted.status, JobStatus::Accepted);

        reject_assignment(
            job_id.clone(),
            "staffA".to_string(),
            "Clash with delivery run".to_string(),
            state.clone(),
        )
        .unwrap();
        let jobs = list_jobs(state.clone()).unwrap();
        let rejected = jobs.iter().find(|job| job.id == job_id).unwrap();
        assert_eq!(rejected.status, JobStatus::Unassigned);
        assert_eq!(
            rejected.rejection_reason.as_deref(),
            Some("Clash with delivery run")
        );
    }

    #[test]
    fn test_availability_ledger_commands() {
        let (app, _dir) = setup_app();
        let state = app.state::<AppServices>();

        // シードの staffA は Monday 09:00-12:00 (Week of 01-07) を持っている
        let weeks = list_planning_weeks();
        assert_eq!(weeks[0], "Week of 01-07");

        // 重なるスロットは弾かれる
        let r = add_availability_entry(
            "staffA".to_string(),
            candidate("Week of 01-07", "Monday", "10:00", "13:00"),
            state.clone(),
        );
        assert!(r.is_err());

        // 隣接スロットは通る
        add_availability_entry(
            "staffA".to_string(),
            candidate("Week of 01-07", "Monday", "12:00", "14:00"),
            state.clone(),
        )
        .unwrap();

        // 一覧は曜日 -> 開始時刻順
        let listed = list_week_entries(
            "staffA".to_string(),
            "Week of 01-07".to_string(),
            state.clone(),
        )
        .unwrap();
        let order: Vec<(&str, &str)> = listed
            .iter()
            .map(|entry| (entry.day.as_str(), entry.start.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Monday", "09:00"),
                ("Monday", "12:00"),
                ("Wednesday", "13:00"),
            ]
        );

        // 編集: 自分自身とは衝突しない
        let entry_id = listed[1].entry_id.clone().unwrap();
        edit_availability_entry(
            "staffA".to_string(),
            entry_id,
            candidate("Week of 01-07", "Monday", "12:00", "15:00"),
            state.clone(),
        )
        .unwrap();

        // 希望メモは週ごとに upsert
        save_preference(
            "staffA".to_string(),
            "Week of 01-07".to_string(),
            "Delivery".to_string(),
            "North".to_string(),
            state.clone(),
        )
        .unwrap();
        save_preference(
            "staffA".to_string(),
            "Week of 01-07".to_string(),
            "Stocktake".to_string(),
            "East".to_string(),
            state.clone(),
        )
        .unwrap();
        let profile = get_staff_profile("staffA".to_string(), state.clone()).unwrap();
        assert_eq!(profile.preference_entries.len(), 1);
        assert_eq!(profile.preference_entries[0].job_types, "Stocktake");

        // staffC の旧形式メモは読み込み時に週1件へ変換済み
        let chitra = get_staff_profile("staffC".to_string(), state.clone()).unwrap();
        assert!(chitra.preference_notes.is_none());
        assert_eq!(chitra.preference_entries.len(), 1);
        assert_eq!(chitra.preference_entries[0].week, "Week of 01-07");
        assert_eq!(chitra.preference_entries[0].job_types, "Counter shifts only");
    }

    #[test]
    fn test_admin_user_crud_and_reset() {
        let (app, _dir) = setup_app();
        let state = app.state::<AppServices>();

        let before = list_users(state.clone()).unwrap().len();

        create_user(
            User {
                username: "Dana".to_string(), // 小文字化されて保存される
                password: "dana123".to_string(),
                role: Role::Staff,
                profile_id: Some("staffB".to_string()),
            },
            state.clone(),
        )
        .unwrap();

        let users = list_users(state.clone()).unwrap();
        assert_eq!(users.len(), before + 1);
        assert!(users.iter().any(|user| user.username == "dana"));

        // 重複ユーザー名は弾く
        let r = create_user(
            User {
                username: "dana".to_string(),
                password: "other".to_string(),
                role: Role::Staff,
                profile_id: None,
            },
            state.clone(),
        );
        assert!(r.is_err());

        update_user(
            "dana".to_string(),
            User {
                username: "dana".to_string(),
                password: "changed".to_string(),
                role: Role::Manager,
                profile_id: None,
            },
            state.clone(),
        )
        .unwrap();
        let users = list_users(state.clone()).unwrap();
        let dana = users.iter().find(|user| user.username == "dana").unwrap();
        assert_eq!(dana.role, Role::Manager);

        delete_user("dana".to_string(), state.clone()).unwrap();
        assert_eq!(list_users(state.clone()).unwrap().len(), before);

        // デモリセットでフィクスチャの内容に戻る
        let job_id = create_job(
            JobDraft {
                title: "Throwaway".to_string(),
                date: "2026-01-20".to_string(),
                duration: 1.0,
                location: String::new(),
                description: String::new(),
            },
            state.clone(),
        )
        .unwrap();
        reset_demo_data(state.clone()).unwrap();
        let jobs = list_jobs(state.clone()).unwrap();
        assert!(jobs.iter().all(|job| job.id != job_id));
        assert_eq!(jobs.len(), 3);
    }
}
