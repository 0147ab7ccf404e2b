use std::fs;
use std::sync::Mutex;

use tauri::Manager;

pub mod application;
pub mod domain;
pub mod infrastructure;

use application::dto::SessionUser;
use infrastructure::snapshot_repo::SnapshotRepository;

// 全ての状態を保持するコンテナ
pub struct AppServices {
    pub store: Mutex<SnapshotRepository>,
    pub session: Mutex<Option<SessionUser>>,
}

impl AppServices {
    pub fn new(store: SnapshotRepository) -> Self {
        Self {
            store: Mutex::new(store),
            session: Mutex::new(None),
        }
    }
}

// =====================
// Tauri エントリポイント
// =====================
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let _ = env_logger::try_init();

    tauri::Builder::default()
        .setup(|app| {
            // --- app_data_dir を取得 ---
            let app_data_dir = app
                .path()
                .app_data_dir()
                .expect("failed to get app data dir");

            // --- ディレクトリ作成（冪等） ---
            fs::create_dir_all(&app_data_dir).expect("failed to create app data dir");

            // --- スナップショットファイルを開く ---
            let data_path = app_data_dir.join("planner-data.json");
            log::info!("Using data file at: {}", data_path.display());

            let store = SnapshotRepository::open(data_path).expect("failed to open data file");

            // --- State に登録 ---
            app.manage(AppServices::new(store));
            Ok(())
        })
        .plugin(tauri_plugin_opener::init())
        .invoke_handler(tauri::generate_handler![
            application::commands::login,
            application::commands::logout,
            application::commands::current_session,
            application::commands::list_planning_weeks,
            application::commands::list_workload_rows,
            application::commands::list_jobs,
            application::commands::create_job,
            application::commands::update_job,
            application::commands::delete_job,
            application::commands::allocate_job,
            application::commands::list_assignments,
            application::commands::accept_assignment,
            application::commands::reject_assignment,
            application::commands::list_staff_profiles,
            application::commands::get_staff_profile,
            application::commands::monthly_summary,
            application::commands::add_availability_entry,
            application::commands::edit_availability_entry,
            application::commands::list_week_entries,
            application::commands::save_preference,
            application::commands::list_users,
            application::commands::create_user,
            application::commands::update_user,
            application::commands::delete_user,
            application::commands::reset_demo_data,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
