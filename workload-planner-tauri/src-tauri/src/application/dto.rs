use serde::{Deserialize, Serialize};

use workload_ledger::model::{ProfileId, Role, WeekHours};

/// ログイン中のユーザー（フロントエンドとの往復用）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub username: String,
    pub role: Role,
    pub profile_id: Option<ProfileId>,
}

/// マネージャ画面の稼働一覧の1行
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadRow {
    pub staff_id: ProfileId,
    pub name: String,
    pub workload_hours: f64,
    pub workload_cap: f64,
    pub assigned_jobs: usize,
    pub status_label: &'static str,
}

/// スタッフ画面の月次サマリ
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: String,
    pub total_hours: f64,
    pub weeks: Vec<WeekHours>,
}
