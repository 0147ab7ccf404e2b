use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use workload_ledger::document::{upgrade_document, PlannerDocument};
use workload_ledger::ledger::intervals_overlap;
use workload_ledger::slot_time::parse_hhmm;

// 引数を構造体として定義します
#[derive(Parser)]
#[command(name = "planner_tools")]
#[command(version = "0.1.0")]
#[command(about = "workload-plannerのスナップショットファイルを操作します", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// スナップショットを現行スキーマへ移行します
    Migrate {
        /// スナップショットファイル
        file: PathBuf,

        /// 出力先（省略時は標準出力）
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// 同一 (week, day) 内のスロット重複が無いか検査します
    CheckOverlaps {
        /// スナップショットファイル
        file: PathBuf,
    },
}

fn load_document(file: &PathBuf) -> Option<PlannerDocument> {
    match fs::read_to_string(file) {
        Ok(text) => match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(raw) => match upgrade_document(raw) {
                Some(document) => Some(document),
                None => {
                    eprintln!("ファイルが形式に沿っていません（移行できないスキーマです）");
                    None
                }
            },
            Err(e) => {
                eprintln!("JSONとして読めませんでした: {}", e);
                None
            }
        },
        Err(e) => {
            eprintln!("エラー: ファイル '{}' を読めませんでした: {}", file.display(), e);
            None
        }
    }
}

fn migrate(file: PathBuf, out: Option<PathBuf>) {
    let Some(document) = load_document(&file) else {
        return;
    };

    match serde_json::to_string_pretty(&document) {
        Ok(text) => {
            if let Some(path) = out {
                if let Err(_e) = fs::write(path, text) {
                    eprintln!("ファイルの書き込みに失敗しました");
                }
            } else {
                println!("{}", text);
            }
        }
        Err(e) => {
            eprintln!("シリアライズに失敗しました: {}", e);
        }
    }
}

fn check_overlaps(file: PathBuf) {
    let Some(document) = load_document(&file) else {
        return;
    };

    let mut violations = 0usize;
    for profile in &document.staff_profiles {
        let entries = &profile.availability_entries;
        for (index, a) in entries.iter().enumerate() {
            for b in &entries[index + 1..] {
                if a.week != b.week || a.day != b.day {
                    continue;
                }
                // 読めない時刻の旧データは比較対象外
                let (Some(start_a), Some(end_a)) = (parse_hhmm(&a.start), parse_hhmm(&a.end))
                else {
                    continue;
                };
                let (Some(start_b), Some(end_b)) = (parse_hhmm(&b.start), parse_hhmm(&b.end))
                else {
                    continue;
                };
                if intervals_overlap(start_a, end_a, start_b, end_b) {
                    violations += 1;
                    println!(
                        "{}: {} {} で {}-{} と {}-{} が重なっています",
                        profile.id, a.week, a.day, a.start, a.end, b.start, b.end
                    );
                }
            }
        }
    }

    if violations == 0 {
        println!("重複はありません");
    } else {
        println!("{} 件の重複が見つかりました", violations);
        std::process::exit(1);
    }
}

fn main() {
    env_logger::init();
    let args = Cli::parse();

    match args.command {
        Commands::Migrate { file, out } => {
            migrate(file, out);
        }
        Commands::CheckOverlaps { file } => {
            check_overlaps(file);
        }
    }
}
