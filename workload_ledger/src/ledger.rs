// =====================
// 空き時間台帳（Availability Ledger）
// =====================
//
// スタッフ1人分の週次スロットと希望メモを台帳として扱う。
// 検証に失敗した操作は台帳を一切変更しない（all-or-nothing）。

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::model::{AvailabilityEntry, EntryId, PreferenceEntry, StaffProfile};
use crate::slot_time::{parse_hhmm, weekday_index, WEEKDAYS};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("Week \"{0}\" is not one of the selectable planning weeks.")]
    InvalidWeek(String),
    #[error("Time \"{0}\" must be in zero-padded 24-hour HH:MM format.")]
    InvalidTimeFormat(String),
    #[error("End time must be later than start time.")]
    NonPositiveDuration,
    #[error("This slot overlaps an existing entry on {day} of {week}.")]
    OverlapConflict { week: String, day: String },
    #[error("Availability entry \"{0}\" was not found.")]
    EntryNotFound(EntryId),
}

/// フォームから渡ってくる未検証のスロット候補
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotCandidate {
    pub week: String,
    pub day: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub notes: String,
}

pub fn fresh_entry_id() -> EntryId {
    Uuid::new_v4().to_string()
}

/// 半開区間 [start, end) 同士の重なり判定
pub fn intervals_overlap(start_a: u16, end_a: u16, start_b: u16, end_b: u16) -> bool {
    start_a.max(start_b) < end_a.min(end_b)
}

impl StaffProfile {
    /// 候補の検証。順序は固定:
    ///   (a) 週ラベル -> (b) 時刻形式 -> (c) 長さ -> (d) 既存スロットとの重なり
    ///
    /// (c) が (d) より先なので、start == end の候補は重なり判定に到達しない。
    /// 編集時は ignore_entry_id で自分自身を重なり判定から除外する。
    fn validate_candidate(
        &self,
        allowed_weeks: &[String],
        candidate: &SlotCandidate,
        ignore_entry_id: Option<&str>,
    ) -> Result<(), LedgerError> {
        if !allowed_weeks.iter().any(|week| week == &candidate.week) {
            return Err(LedgerError::InvalidWeek(candidate.week.clone()));
        }

        let start = parse_hhmm(&candidate.start)
            .ok_or_else(|| LedgerError::InvalidTimeFormat(candidate.start.clone()))?;
        let end = parse_hhmm(&candidate.end)
            .ok_or_else(|| LedgerError::InvalidTimeFormat(candidate.end.clone()))?;

        if end <= start {
            return Err(LedgerError::NonPositiveDuration);
        }

        for existing in &self.availability_entries {
            if ignore_entry_id.is_some() && existing.entry_id.as_deref() == ignore_entry_id {
                continue; // 自分自身とは比較しない
            }
            if existing.week != candidate.week || existing.day != candidate.day {
                continue;
            }
            // 既存側の時刻が読めない場合は比較のしようが無いのでスキップ
            let (Some(existing_start), Some(existing_end)) =
                (parse_hhmm(&existing.start), parse_hhmm(&existing.end))
            else {
                continue;
            };
            if intervals_overlap(start, end, existing_start, existing_end) {
                return Err(LedgerError::OverlapConflict {
                    week: candidate.week.clone(),
                    day: candidate.day.clone(),
                });
            }
        }
        Ok(())
    }

    /// スロットを追加する。成功時は新しいIDを採番して台帳へ積む
    pub fn add_entry(
        &mut self,
        allowed_weeks: &[String],
        candidate: &SlotCandidate,
    ) -> Result<(), LedgerError> {
        self.validate_candidate(allowed_weeks, candidate, None)?;

        self.availability_entries.push(AvailabilityEntry {
            entry_id: Some(fresh_entry_id()),
            week: candidate.week.clone(),
            day: candidate.day.clone(),
            start: candidate.start.clone(),
            end: candidate.end.clone(),
            notes: candidate.notes.clone(),
            updated_at: None, // 作成時は記録しない
        });
        Ok(())
    }

    /// 既存スロットの編集。IDは変えず、updated_at を刻む
    pub fn edit_entry(
        &mut self,
        allowed_weeks: &[String],
        entry_id: &str,
        candidate: &SlotCandidate,
    ) -> Result<(), LedgerError> {
        let index = self
            .availability_entries
            .iter()
            .position(|entry| entry.entry_id.as_deref() == Some(entry_id))
            .ok_or_else(|| LedgerError::EntryNotFound(entry_id.to_string()))?;

        self.validate_candidate(allowed_weeks, candidate, Some(entry_id))?;

        let entry = &mut self.availability_entries[index];
        entry.week = candidate.week.clone();
        entry.day = candidate.day.clone();
        entry.start = candidate.start.clone();
        entry.end = candidate.end.clone();
        entry.notes = candidate.notes.clone();
        entry.updated_at = Some(Utc::now());
        Ok(())
    }

    /// 指定週のスロット一覧（曜日順 -> 開始時刻順）
    ///
    /// 表示順は保存順とは無関係にここで毎回計算する。
    /// リスト外の曜日は末尾、読めない開始時刻は文字列比較にフォールバック。
    pub fn list_entries_for_week(&self, week: &str) -> Vec<AvailabilityEntry> {
        let mut entries: Vec<AvailabilityEntry> = self
            .availability_entries
            .iter()
            .filter(|entry| entry.week == week)
            .cloned()
            .collect();

        entries.sort_by(|a, b| {
            let day_a = weekday_index(&a.day).unwrap_or(WEEKDAYS.len());
            let day_b = weekday_index(&b.day).unwrap_or(WEEKDAYS.len());
            day_a.cmp(&day_b).then_with(|| {
                match (parse_hhmm(&a.start), parse_hhmm(&b.start)) {
                    (Some(start_a), Some(start_b)) => start_a.cmp(&start_b),
                    _ => a.start.cmp(&b.start),
                }
            })
        });
        entries
    }

    /// (profile, week) の希望メモを upsert する。週ごとに高々1件
    pub fn save_preference(
        &mut self,
        allowed_weeks: &[String],
        week: &str,
        job_types: &str,
        locations: &str,
    ) -> Result<(), LedgerError> {
        if !allowed_weeks.iter().any(|allowed| allowed == week) {
            return Err(LedgerError::InvalidWeek(week.to_string()));
        }

        if let Some(existing) = self
            .preference_entries
            .iter_mut()
            .find(|entry| entry.week == week)
        {
            existing.job_types = job_types.to_string();
            existing.locations = locations.to_string();
            existing.updated_at = Utc::now();
        } else {
            self.preference_entries.push(PreferenceEntry {
                entry_id: fresh_entry_id(),
                week: week.to_string(),
                job_types: job_types.to_string(),
                locations: locations.to_string(),
                updated_at: Utc::now(),
            });
        }
        Ok(())
    }

    /// 旧形式の単一メモを週1件の PreferenceEntry へ変換する（冪等）
    ///
    /// PreferenceEntry が1件でもあれば何もしない。
    /// 変換した場合のみ旧フィールドを破棄する。
    pub fn migrate_legacy_preference(&mut self, default_week: &str) {
        if !self.preference_entries.is_empty() {
            return;
        }
        if let Some(notes) = self.preference_notes.take() {
            self.preference_entries.push(PreferenceEntry {
                entry_id: fresh_entry_id(),
                week: default_week.to_string(),
                job_types: notes.job_types,
                locations: notes.locations,
                updated_at: Utc::now(),
            });
        }
    }

    /// ID無しで保存されていた旧スロットへIDを採番する（冪等）
    ///
    /// 編集時の「自分自身を除外する」判定にIDが要るため、
    /// プロフィール読み込み直後に必ず一度呼ぶこと。
    pub fn ensure_entry_ids(&mut self) {
        for entry in &mut self.availability_entries {
            if entry.entry_id.is_none() {
                entry.entry_id = Some(fresh_entry_id());
            }
        }
    }

    /// 読み込み直後の正規化（ID採番 -> 旧メモ変換）
    pub fn normalize(&mut self, default_week: &str) {
        self.ensure_entry_ids();
        self.migrate_legacy_preference(default_week);
    }
}
