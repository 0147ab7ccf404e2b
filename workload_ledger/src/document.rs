// =====================
// スナップショット文書とスキーマ移行
// =====================
//
// アプリの全状態は version タグ付きの単一JSON文書として保存される。
// 読み込みは「旧バージョンなら移行チェーンを順に適用 -> 型付きで検証」
// の二段構え。どこかで失敗したら呼び出し側が同梱フィクスチャから再シードする。

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::model::{Job, StaffProfile, User};

/// 現行スキーマのタグ
pub const DATA_VERSION: &str = "2";

/// 計画週の閉じた集合。UI側のセレクトと同じ並び
pub const PLANNING_WEEKS: [&str; 4] = [
    "Week of 01-07",
    "Week of 08-14",
    "Week of 15-21",
    "Week of 22-28",
];

pub fn planning_weeks() -> Vec<String> {
    PLANNING_WEEKS.iter().map(|week| week.to_string()).collect()
}

/// 旧メモの変換先に使う既定の週ラベル
pub fn default_week_label() -> &'static str {
    PLANNING_WEEKS[0]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerDocument {
    pub version: String,
    pub users: Vec<User>,
    pub jobs: Vec<Job>,
    pub staff_profiles: Vec<StaffProfile>,
}

// --- 移行チェーン ---
//
// 各ステップは「どのバージョンから」を from に持つ純関数。
// 文書の version が from に一致する限り順に適用する。

pub struct Migration {
    pub from: &'static str,
    pub to: &'static str,
    pub apply: fn(Value) -> Value,
}

pub const MIGRATIONS: [Migration; 1] = [Migration {
    from: "1",
    to: "2",
    apply: migrate_v1_to_v2,
}];

fn document_version(raw: &Value) -> Option<&str> {
    raw.get("version")?.as_str()
}

/// 生のJSON文書を現行スキーマの型付き文書へ引き上げる
///
/// None は「この文書は救えない」の意味（未知のバージョン、必須配列の欠落、
/// 型の不一致）。その場合の再シードは呼び出し側の責務。
pub fn upgrade_document(mut raw: Value) -> Option<PlannerDocument> {
    loop {
        let version = document_version(&raw)?.to_string();
        if version == DATA_VERSION {
            break;
        }
        let step = MIGRATIONS.iter().find(|step| step.from == version)?;
        log::info!("snapshot schema {} -> {}", step.from, step.to);
        raw = (step.apply)(raw);
    }

    let mut document: PlannerDocument = serde_json::from_value(raw).ok()?;

    // 型検証を通った後、プロフィールごとの正規化を一度だけ走らせる。
    // 以降の台帳操作はID採番済み・新形式メモ前提で動ける。
    for profile in &mut document.staff_profiles {
        profile.normalize(default_week_label());
    }
    Some(document)
}

/// v1 -> v2
///
/// v1のプロフィールは表示用のフラット文字列 (`preferences`, `location`) を
/// 持つだけで、スロット/メモの配列が無い。配列を保証し、フラット文字列は
/// 旧形式メモ (`preferenceNotes`) へ畳み込んでおく（週1件のエントリへの
/// 変換は読み込み時の正規化がやる）。
fn migrate_v1_to_v2(mut raw: Value) -> Value {
    if let Some(profiles) = raw.get_mut("staffProfiles").and_then(Value::as_array_mut) {
        for profile in profiles {
            let Some(map) = profile.as_object_mut() else {
                continue;
            };
            if !map.contains_key("availabilityEntries") {
                map.insert("availabilityEntries".to_string(), Value::Array(vec![]));
            }
            if !map.contains_key("preferenceEntries") {
                map.insert("preferenceEntries".to_string(), Value::Array(vec![]));
            }
            if !map.contains_key("preferenceNotes") {
                let job_types = map
                    .get("preferences")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string();
                let locations = map
                    .get("location")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string();
                if !job_types.is_empty() || !locations.is_empty() {
                    map.insert(
                        "preferenceNotes".to_string(),
                        json!({ "jobTypes": job_types, "locations": locations }),
                    );
                }
            }
            map.remove("preferences");
        }
    }
    raw["version"] = Value::String(DATA_VERSION.to_string());
    raw
}
