use std::fs;
use std::path::PathBuf;

use workload_ledger::document::{upgrade_document, PlannerDocument};

// 同梱フィクスチャ。初回起動とスキーマ不一致時の再シード元
const SEED_DOCUMENT: &str = include_str!("../../fixtures/seed.json");

pub struct SnapshotRepository {
    path: PathBuf,
    document: PlannerDocument,
}

impl SnapshotRepository {
    /// スナップショットファイルを開く
    ///
    /// 1. ファイルを読んで生JSONとして解釈
    /// 2. 移行チェーン + 型検証 + 正規化 (upgrade_document)
    /// 3. どこかで失敗したら同梱フィクスチャから再シード
    /// 4. 正規化済みの文書を書き戻してから返す
    pub fn open(path: PathBuf) -> Result<Self, String> {
        let document = match fs::read_to_string(&path) {
            Ok(text) => {
                let upgraded = serde_json::from_str::<serde_json::Value>(&text)
                    .ok()
                    .and_then(upgrade_document);
                match upgraded {
                    Some(document) => document,
                    None => {
                        log::warn!(
                            "snapshot at {} is unreadable or has an unknown schema, reseeding",
                            path.display()
                        );
                        Self::seed_document()?
                    }
                }
            }
            Err(_) => {
                log::info!("no snapshot at {}, seeding", path.display());
                Self::seed_document()?
            }
        };

        let repo = Self { path, document };
        repo.save()?;
        Ok(repo)
    }

    fn seed_document() -> Result<PlannerDocument, String> {
        let raw: serde_json::Value =
            serde_json::from_str(SEED_DOCUMENT).map_err(|e| e.to_string())?;
        upgrade_document(raw).ok_or_else(|| String::from("bundled seed document is invalid"))
    }

    pub fn document(&self) -> &PlannerDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut PlannerDocument {
        &mut self.document
    }

    /// 全量スナップショットの書き戻し（last write wins）
    pub fn save(&self) -> Result<(), String> {
        let text = serde_json::to_string_pretty(&self.document).map_err(|e| e.to_string())?;
        fs::write(&self.path, text).map_err(|e| e.to_string())
    }

    /// フィクスチャの内容へ戻す（デモ用リセット）
    pub fn reseed(&mut self) -> Result<(), String> {
        self.document = Self::seed_document()?;
        self.save()
    }
}
