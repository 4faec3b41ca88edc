#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveTime};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use worktime::config::CONFIG_DIR_ENV;
use worktime::models::{LeaveReason, LeaveRecord, WorkRecord};

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

pub fn work(id: i64, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> WorkRecord {
    WorkRecord::new(id, date, start, end).expect("valid work record")
}

pub fn leave(date: NaiveDate, reason: LeaveReason) -> LeaveRecord {
    LeaveRecord::new(date, reason)
}

/// Isolated config dir + database path for one test.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn db_path(&self) -> String {
        self.dir
            .path()
            .join("worktime.sqlite")
            .to_string_lossy()
            .to_string()
    }

    pub fn out(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `worktime --db <db>` with the config directory pointed into the temp dir.
    pub fn wt(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("worktime");
        cmd.env(CONFIG_DIR_ENV, self.dir.path());
        cmd.env_remove("RUST_LOG");
        cmd.args(["--db", &self.db_path()]);
        cmd
    }

    pub fn init(&self) {
        self.wt().args(["--test", "init"]).assert().success();
    }
}
