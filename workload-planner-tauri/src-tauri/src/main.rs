#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    workload_planner_tauri_lib::run();
}
