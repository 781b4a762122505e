use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

const SAVED_SEARCHES: &str = r#"
# include "saved_searches.hh"

namespace Astroid {
  SavedSearches::SavedSearches (MainWindow * mw) : Mode (mw) {
    keys.title = "Saved searches";
    keys.register_key ("j", { Key (GDK_KEY_Down) },
        "searches.down",
        "Move cursor down",
        [&] (Key) {
          tv.get_cursor (path, c);
          return true;
        });

    keys.register_key ("J",
        "searches.page_down",
        "Page down",
        [&] (Key) {
          auto adj = tv.get_vadjustment ();
          return true;
        });
  }
}
"#;

const THREAD_INDEX: &str = r#"
  void ThreadIndexListView::register_keys () {
    Keybindings * keys = &(thread_index->keys);

    keys->register_key (UnboundKey (), "thread_index.forward_inline",
        "Forward last message in thread inlined",
        [&] (Key) {
          return true;
        });

    multi_keys.register_key ("N",
                             "thread_index.multi.mark_unread",
                             "Mark unread",
                             bind (&ThreadIndexListView::multi_key_handler, this, MUnread, _1));
  }
"#;

fn astroid_tree() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file("src/modes/saved_searches.cc", SAVED_SEARCHES)?;
    test.write_file(
        "src/modes/thread_index/thread_index_list_view.cc",
        THREAD_INDEX,
    )?;
    test.write_file("src/main.cc", "int main () { return 0; }\n")?;
    test.write_file(
        "src/modes/keybindings.hh",
        r#"keys.register_key ("x", "not.scanned", "Header", [&] (Key) {});"#,
    )?;
    Ok(test)
}

#[test]
fn test_scan_reference() -> Result<()> {
    let test = astroid_tree()?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ## keys from: ./src/modes/saved_searches.cc
    searches.down=j	 # Move cursor down, alternates {Key (GDK_KEY_Down)}
    searches.page_down=J	 # Page down

    ## keys from: ./src/modes/thread_index/thread_index_list_view.cc
    thread_index.forward_inline=UnboundKey	 # Forward last message in thread inlined
    thread_index.multi.mark_unread=N	 # Mark unread


    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_is_deterministic() -> Result<()> {
    let test = astroid_tree()?;

    let first = test.scan_command().output()?;
    let second = test.scan_command().output()?;

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    Ok(())
}

#[test]
fn test_scan_without_bindings() -> Result<()> {
    let test = CliTest::with_file("src/main.cc", "int main () { return 0; }\n")?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_boundary_not_found_aborts() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/a.cc",
        r#"keys.register_key ("a", "first", "First", [&] (Key) {});"#,
    )?;
    test.write_file("src/b.cc", r#"keys.register_key ("b", "second", "Second");"#)?;
    test.write_file(
        "src/c.cc",
        r#"keys.register_key ("c", "third", "Third", [&] (Key) {});"#,
    )?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----
    ## keys from: ./src/a.cc
    first=a	 # First


    ----- stderr -----
    error: ./src/b.cc:1:20: no end of register_key arguments within 1024 bytes (byte offset 19)
    ");

    Ok(())
}

#[test]
fn test_scan_argument_parse_error() -> Result<()> {
    let test = CliTest::with_file(
        "src/a.cc",
        r#"keys.register_key ("a" "first" [&] (Key) {});"#,
    )?;

    assert_cmd_snapshot!(test.scan_command(), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: ./src/a.cc:1:20: cannot parse register_key arguments: expected ',' after key (byte offset 19)
      --> "\"a\" \"first\" [&] "
    "#);

    Ok(())
}

#[test]
fn test_scan_comment_between_arguments() -> Result<()> {
    let test = CliTest::with_file(
        "src/a.cc",
        r#"keys.register_key ("j", "a.down", // don't wrap
        "Say \"down\"", [&] (Key) {});"#,
    )?;

    assert_cmd_snapshot!(test.scan_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ## keys from: ./src/a.cc
    a.down=j	 # Say "down"


    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_scan_lookahead_override() -> Result<()> {
    let test = CliTest::with_file(
        "src/a.cc",
        r#"keys.register_key ("a", "first", "First", [&] (Key) {});"#,
    )?;

    assert_cmd_snapshot!(test.scan_command().args(["--lookahead", "8"]), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: ./src/a.cc:1:20: no end of register_key arguments within 8 bytes (byte offset 19)
    ");

    Ok(())
}

#[test]
fn test_scan_source_root_and_extension_flags() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "lib/view.cpp",
        r#"keys.register_key ("v", "view.open", "Open", [&] (Key) {});"#,
    )?;
    test.write_file(
        "lib/view.cc",
        r#"keys.register_key ("w", "view.close", "Close", [&] (Key) {});"#,
    )?;

    assert_cmd_snapshot!(
        test.scan_command()
            .args(["--source-root", "lib", "--extension", "cpp"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ## keys from: lib/view.cpp
    view.open=v	 # Open


    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".keyscanrc.json",
        r#"{
         "sourceRoot": "source",
         "ignores": ["plugin"]
     }"#,
    )?;
    test.write_file(
        "source/mode.cc",
        r#"keys.register_key ("m", "mode.next", "Next", [&] (Key) {});"#,
    )?;
    test.write_file(
        "source/plugin/manager.cc",
        r#"keys.register_key ("p", "plugin.reload", "Reload", [&] (Key) {});"#,
    )?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ## keys from: source/mode.cc
    mode.next=m	 # Next


    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_invalid_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".keyscanrc.json", r#"{ "lookahead": 0 }"#)?;
    test.write_file("src/main.cc", "")?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: 'lookahead' must be greater than 0
    ");

    Ok(())
}

#[test]
fn test_scan_missing_source_root() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: Source root is not a directory: ./src
    ");

    Ok(())
}

#[test]
fn test_scan_json() -> Result<()> {
    let test = astroid_tree()?;

    assert_cmd_snapshot!(test.scan_command().args(["--format", "json"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    [
      {
        "file": "./src/modes/saved_searches.cc",
        "bindings": [
          {
            "key": "j",
            "alternates": "{Key (GDK_KEY_Down)}",
            "name": "searches.down",
            "description": "Move cursor down",
            "offset": 173
          },
          {
            "key": "J",
            "name": "searches.page_down",
            "description": "Page down",
            "offset": 369
          }
        ]
      },
      {
        "file": "./src/modes/thread_index/thread_index_list_view.cc",
        "bindings": [
          {
            "key": "UnboundKey",
            "name": "thread_index.forward_inline",
            "description": "Forward last message in thread inlined",
            "offset": 121
          },
          {
            "key": "N",
            "name": "thread_index.multi.mark_unread",
            "description": "Mark unread",
            "offset": 302
          }
        ]
      }
    ]

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_scan_json_error_writes_nothing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/a.cc",
        r#"keys.register_key ("a", "first", "First", [&] (Key) {});"#,
    )?;
    test.write_file("src/b.cc", r#"keys.register_key ("b", "second", "Second");"#)?;

    assert_cmd_snapshot!(test.scan_command().args(["--format", "json"]), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: ./src/b.cc:1:20: no end of register_key arguments within 1024 bytes (byte offset 19)
    ");

    Ok(())
}

#[test]
fn test_scan_verbose_diagnostics() -> Result<()> {
    let test = astroid_tree()?;

    assert_cmd_snapshot!(test.scan_command().arg("-v"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ## keys from: ./src/modes/saved_searches.cc
    searches.down=j	 # Move cursor down, alternates {Key (GDK_KEY_Down)}
    searches.page_down=J	 # Page down

    ## keys from: ./src/modes/thread_index/thread_index_list_view.cc
    thread_index.forward_inline=UnboundKey	 # Forward last message in thread inlined
    thread_index.multi.mark_unread=N	 # Mark unread


    ----- stderr -----
    note: No .keyscanrc.json found, using default configuration
    source root: ./src
    checking: ./src/main.cc
    checking: ./src/modes/saved_searches.cc
    checking: ./src/modes/thread_index/thread_index_list_view.cc
    ");

    Ok(())
}

#[test]
fn test_help_without_command() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Generate a keybinding reference from register_key calls in C++ sources

    Usage: keyscan [COMMAND]

    Commands:
      scan  Extract key bindings from register_key calls and print them
      init  Initialize a new .keyscanrc.json configuration file
      help  Print this message or the help of the given subcommand(s)

    Options:
      -h, --help     Print help
      -V, --version  Print version

    ----- stderr -----
    ");

    Ok(())
}
