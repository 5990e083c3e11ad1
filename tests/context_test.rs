//! Tests for root and child context construction.

use std::sync::Arc;

use rstest::rstest;

use kfc_data::application::services::{DataService, DATA_GROUP};
use kfc_data::application::{Context, ProcessContext};
use kfc_data::domain::LogLevel;
use kfc_data::extension::ExtensionRegistry;
use kfc_data::infrastructure::traits::TracingLoggerFactory;
use kfc_data::util::testing::RecordingRuntimeLog;

fn enter(process: &ProcessContext) -> Arc<Context> {
    let service = DataService::new(
        Arc::new(ExtensionRegistry::new()),
        Arc::new(TracingLoggerFactory),
        Arc::new(RecordingRuntimeLog::default()),
    );
    let group = service.enter(process).unwrap();
    Arc::clone(group.context())
}

#[rstest]
#[case(LogLevel::Trace)]
#[case(LogLevel::Warning)]
#[case(LogLevel::Critical)]
fn given_any_log_level_when_entering_data_then_low_latency_off(#[case] level: LogLevel) {
    let process = ProcessContext::from_home("/srv/kfc", level).unwrap();
    let root = enter(&process);

    assert!(!root.low_latency());
    assert_eq!(root.logger().component(), DATA_GROUP);
    assert_eq!(root.logger().level(), level);
    assert_eq!(root.logger().console(), process.console_location.uname());
}

#[rstest]
#[case("/srv/kfc")]
#[case("/home/trader/.kfc")]
fn given_root_when_deriving_child_then_inherited_fields_equal_parent(#[case] home: &str) {
    let process = ProcessContext::from_home(home, LogLevel::Info).unwrap();
    let root = enter(&process);

    let child = Context::child("get", Some(&root)).unwrap();

    assert_eq!(child.runtime_dir(), root.runtime_dir());
    assert_eq!(child.archive_dir(), root.archive_dir());
    assert_eq!(child.runtime_locator(), root.runtime_locator());
    assert_eq!(child.config_location(), root.config_location());
    assert_eq!(child.console_location(), root.console_location());
    assert_eq!(child.index_location(), root.index_location());
    assert!(child.logger().ptr_eq(root.logger()));
    assert_eq!(child.low_latency(), root.low_latency());
}

#[test]
fn given_grandchild_when_deriving_then_still_matches_root() {
    let process = ProcessContext::from_home("/srv/kfc", LogLevel::Info).unwrap();
    let root = enter(&process);
    let child = Arc::new(Context::child("get", Some(&root)).unwrap());

    let grandchild = Context::child("nested", Some(&child)).unwrap();

    assert_eq!(grandchild.runtime_dir(), root.runtime_dir());
    assert!(grandchild.logger().ptr_eq(root.logger()));
    assert!(grandchild.parent().and_then(Context::parent).is_some_and(Context::is_root));
}

#[test]
fn given_root_when_checking_paths_then_matches_process_context() {
    let process = ProcessContext::from_home("/srv/kfc", LogLevel::Info).unwrap();
    let root = enter(&process);

    assert_eq!(root.runtime_dir(), process.runtime_dir.as_path());
    assert_eq!(root.archive_dir(), process.archive_dir.as_path());
    assert_eq!(root.index_location().uname(), "system/journal/index/live");
    assert_eq!(root.config_location().uname(), "system/etc/kungfu/live");
}
