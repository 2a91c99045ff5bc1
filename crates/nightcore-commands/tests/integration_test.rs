//! Integration tests for nightcore-commands crate.
//!
//! These tests drive extension loading, list composition and the command-tree
//! summary through the public API, using real poise commands as fixtures.

use nightcore_commands::features::meta::commands::ping;
use nightcore_commands::{
    collect_extensions, load_extensions, log_tree_summary, summarize_tree, ChildEntry,
    CommandNode, Context, Error, ExtensionCatalog, ExtensionTable, FeatureSource, TopLevelEntry,
};
use nightcore_common::test_utils::{capture_logs, count_level};
use nightcore_common::ExtensionId;
use nightcore_config::ExtensionToggles;
use proptest::prelude::*;
use tracing::Level;

/// Parent of the logging subcommands.
#[poise::command(slash_command, subcommands("logging", "view"))]
async fn config(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Logging settings.
#[poise::command(slash_command, subcommands("setup", "off"))]
async fn logging(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Enable logging.
#[poise::command(slash_command)]
async fn setup(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Disable logging.
#[poise::command(slash_command)]
async fn off(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Show the settings.
#[poise::command(slash_command)]
async fn view(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Text-only command, never synced.
#[poise::command(prefix_command)]
async fn legacy(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

#[test]
fn test_default_run_loads_ping_and_summarizes_it() {
    let ids = collect_extensions(&ExtensionToggles::default(), &ExtensionCatalog::builtin());
    let (host, report) = load_extensions(&ids, &ExtensionTable::builtin());
    assert!(report.is_complete());
    assert_eq!(host.cogs(), ["Ping".to_string()]);

    let summary = summarize_tree(&CommandNode::from_commands(host.commands()));
    assert_eq!(summary.top_level_total, 1);
    assert_eq!(summary.leaf_overall, 1);
    assert_eq!(
        summary.top_level,
        vec![TopLevelEntry::Leaf {
            name: "ping".to_string(),
            qualified: "ping".to_string(),
        }]
    );
}

#[test]
fn test_missing_extension_logs_one_error_and_continues() {
    let ids = vec![
        ExtensionId::new("features.nonexistent"),
        ExtensionId::new(ping::EXTENSION_ID),
    ];

    let ((host, report), output) = capture_logs(|| load_extensions(&ids, &ExtensionTable::builtin()));

    assert_eq!(count_level(&output, Level::ERROR), 1);
    assert!(output.contains("[failed] Failed to load features.nonexistent"));
    assert!(output.contains("[success] Successfully loaded features.meta.commands.ping"));
    assert_eq!(report.failed.len(), 1);
    assert_eq!(host.commands().len(), 1);
}

#[test]
fn test_empty_load_list_warns() {
    let ((host, report), output) = capture_logs(|| load_extensions(&[], &ExtensionTable::builtin()));

    assert!(host.cogs().is_empty());
    assert!(report.is_complete());
    assert_eq!(count_level(&output, Level::WARN), 1);
    assert!(output.contains("No cogs to load"));
}

#[test]
fn test_empty_tree() {
    let summary = summarize_tree(&[]);
    assert_eq!(summary.top_level_total, 0);
    assert_eq!(summary.leaf_overall, 0);
    assert!(summary.top_level.is_empty());

    let ((), output) = capture_logs(|| log_tree_summary(&summary));
    assert_eq!(output.lines().count(), 1);
    assert!(output.contains("Slash tree summary: top_level_total=0 leaf_overall=0"));
}

#[test]
fn test_nested_groups_are_counted() {
    let mut commands = vec![config(), ping::ping(), legacy()];
    commands[0].category = Some("Config".into());

    let roots = CommandNode::from_commands(&commands);
    assert_eq!(roots.len(), 2, "prefix-only commands are not part of the tree");

    let summary = summarize_tree(&roots);
    assert_eq!(summary.top_level_total, 2);
    assert_eq!(summary.leaf_overall, 4);

    let TopLevelEntry::Group {
        name,
        children_total,
        leaf_total,
        children,
    } = &summary.top_level[0]
    else {
        panic!("expected a group, got {:?}", summary.top_level[0]);
    };
    assert_eq!(name, "config");
    assert_eq!(*children_total, 2);
    assert_eq!(*leaf_total, 3);
    assert_eq!(
        children,
        &vec![
            ChildEntry::Group {
                qualified: "config logging".to_string(),
                children_count: 2,
            },
            ChildEntry::Leaf {
                qualified: "config logging setup".to_string(),
                binding: None,
            },
            ChildEntry::Leaf {
                qualified: "config logging off".to_string(),
                binding: None,
            },
            ChildEntry::Leaf {
                qualified: "config view".to_string(),
                binding: None,
            },
        ]
    );
}

#[test]
fn test_summary_log_lines() {
    let roots = vec![
        CommandNode::group(
            "config",
            vec![
                CommandNode::group("logging", vec![CommandNode::leaf("setup", Some("Config"))]),
                CommandNode::leaf("view", None),
            ],
        ),
        CommandNode::leaf("ping", Some("Ping")),
    ];

    let ((), output) = capture_logs(|| log_tree_summary(&summarize_tree(&roots)));

    assert!(output.contains("Slash tree summary: top_level_total=2 leaf_overall=3"));
    assert!(output.contains("  /config (group) children=2 leaf=2"));
    assert!(output.contains("     - config logging (subgroup, children=1)"));
    assert!(output.contains("     - config logging setup (command, binding=Config)"));
    assert!(output.contains("     - config view (command, binding=None)"));
    assert!(output.contains("  /ping (leaf)"));
    assert_eq!(count_level(&output, Level::INFO), 6);
}

#[test]
fn test_summary_serializes_with_type_tags() {
    let summary = summarize_tree(&[
        CommandNode::leaf("ping", Some("Ping")),
        CommandNode::group("config", vec![CommandNode::leaf("view", Some("Config"))]),
    ]);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["top_level"][0]["type"], "leaf");
    assert_eq!(json["top_level"][1]["type"], "group");
    assert_eq!(json["top_level"][1]["children"][0]["type"], "leaf");
    assert_eq!(json["top_level"][1]["children"][0]["binding"], "Config");
}

fn alpha() -> Vec<ExtensionId> {
    vec![ExtensionId::new("features.alpha.one"), ExtensionId::new("features.alpha.two")]
}

fn beta() -> Vec<ExtensionId> {
    vec![ExtensionId::new("features.beta.one")]
}

fn events() -> Vec<ExtensionId> {
    vec![ExtensionId::new("events.welcome")]
}

fn tasks() -> Vec<ExtensionId> {
    vec![ExtensionId::new("tasks.cleanup")]
}

fn test_catalog() -> ExtensionCatalog {
    ExtensionCatalog {
        features: vec![
            FeatureSource {
                name: "alpha",
                extensions: alpha,
            },
            FeatureSource {
                name: "beta",
                extensions: beta,
            },
        ],
        events,
        tasks,
    }
}

proptest! {
    #[test]
    fn test_collected_list_follows_toggles(
        alpha_on in any::<bool>(),
        beta_on in any::<bool>(),
        events_on in any::<bool>(),
        tasks_on in any::<bool>(),
    ) {
        let toggles = ExtensionToggles::default()
            .with_feature("alpha", alpha_on)
            .with_feature("beta", beta_on)
            .with_category("events", events_on)
            .with_category("tasks", tasks_on);

        let mut expected = Vec::new();
        for (on, source) in [
            (alpha_on, alpha as fn() -> Vec<ExtensionId>),
            (beta_on, beta),
            (events_on, events),
            (tasks_on, tasks),
        ] {
            if on {
                expected.extend(source());
            }
        }

        prop_assert_eq!(collect_extensions(&toggles, &test_catalog()), expected);
    }
}
