// =====================
// スナップショット文書のレコード定義
// =====================

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// IDの型エイリアス（中身はどれも不透明な文字列）
pub type EntryId = String;
pub type ProfileId = String;
pub type JobId = String;

// --- 1. User (ログインアカウント) ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Staff,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    // デモ用に平文のまま保存する（元データと同じ扱い）
    pub password: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<ProfileId>,
}

// --- 2. Job (マネージャが作成・割当する仕事) ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Unassigned,
    Assigned,
    Accepted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub date: String,
    /// 所要時間（時間単位）
    pub duration: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub status: JobStatus,
    #[serde(default)]
    pub assigned_to: Option<ProfileId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

// --- 3. AvailabilityEntry (空き時間スロット) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityEntry {
    // 旧スナップショットはID無しで保存されていることがあるためOptionにしています。
    // 読み込み時の ensure_entry_ids で必ず埋まります。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<EntryId>,
    pub week: String,
    pub day: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub notes: String,
    /// 編集されたときだけ記録する
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// --- 4. PreferenceEntry (週ごとの希望メモ) ---
// (profile, week) につき高々1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceEntry {
    pub entry_id: EntryId,
    pub week: String,
    #[serde(default)]
    pub job_types: String,
    #[serde(default)]
    pub locations: String,
    pub updated_at: DateTime<Utc>,
}

/// 旧形式: 週の区別が無い単一の希望メモ
/// 読み込み時に migrate_legacy_preference で PreferenceEntry へ変換される
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceNotes {
    #[serde(default)]
    pub job_types: String,
    #[serde(default)]
    pub locations: String,
}

// --- 5. 月次サマリ ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekHours {
    pub label: String,
    pub hours: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyWorkload {
    pub total_hours: f64,
    #[serde(default)]
    pub weeks: Vec<WeekHours>,
}

// --- 6. StaffProfile (スタッフ台帳/メイン構造体) ---
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffProfile {
    pub id: ProfileId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_eligible")]
    pub eligible: bool,
    #[serde(default)]
    pub workload_hours: f64,
    #[serde(default)]
    pub workload_cap: f64,
    /// 月ラベル -> 月次サマリ
    #[serde(default)]
    pub monthly_workload: BTreeMap<String, MonthlyWorkload>,
    #[serde(default)]
    pub availability_entries: Vec<AvailabilityEntry>,
    #[serde(default)]
    pub preference_entries: Vec<PreferenceEntry>,
    /// 旧形式の希望メモ。変換後は破棄される
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference_notes: Option<PreferenceNotes>,
}

fn default_eligible() -> bool {
    true
}
