//! Call tree traversal tests

use pretty_assertions::assert_eq;

use rust_procmap::graph::{render_tree, TreePrinter, TreeStyle};
use rust_procmap::model::{MalformedPolicy, ProcedureCatalog, SqlSource};

fn catalog(sources: &[(&str, &str)]) -> ProcedureCatalog {
    ProcedureCatalog::from_sources(
        sources
            .iter()
            .map(|(label, text)| SqlSource::new(*label, *text))
            .collect(),
        MalformedPolicy::Strict,
    )
    .expect("catalog should build")
}

fn tree(cat: &ProcedureCatalog, start: &str) -> Vec<String> {
    let record = cat
        .lookup(start, "dbo")
        .unwrap()
        .expect("start procedure should exist");
    render_tree(cat, record, TreeStyle::default()).unwrap()
}

#[test]
fn test_three_step_cycle_is_cut_at_repeated_ancestor() {
    let cat = catalog(&[
        ("a.sql", "CREATE PROC dbo.A AS EXEC dbo.B"),
        ("b.sql", "CREATE PROC dbo.B AS EXEC dbo.C"),
        ("c.sql", "CREATE PROC dbo.C AS EXEC dbo.A"),
    ]);

    assert_eq!(
        tree(&cat, "A"),
        vec![
            "[dbo].[A]",
            "|\t[dbo].[B]",
            "|\t|\t[dbo].[C]",
            "|\t|\t|\t[dbo].[A]",
            "|\t|\t|\t|\t[dbo].[B]...",
        ]
    );
}

#[test]
fn test_diamond_is_expanded_on_every_path() {
    let cat = catalog(&[
        ("a.sql", "CREATE PROC dbo.A AS\nEXEC dbo.B\nEXEC dbo.C"),
        ("b.sql", "CREATE PROC dbo.B AS EXEC dbo.D"),
        ("c.sql", "CREATE PROC dbo.C AS EXEC dbo.D"),
        ("d.sql", "CREATE PROC dbo.D AS EXEC dbo.E"),
        ("e.sql", "CREATE PROC dbo.E AS SELECT 1"),
    ]);

    assert_eq!(
        tree(&cat, "A"),
        vec![
            "[dbo].[A]",
            "|\t[dbo].[B]",
            "|\t|\t[dbo].[D]",
            "|\t|\t|\t[dbo].[E]",
            "|\t[dbo].[C]",
            "|\t|\t[dbo].[D]",
            "|\t|\t|\t[dbo].[E]",
        ]
    );
}

#[test]
fn test_sibling_calls_do_not_count_as_ancestors() {
    // B is called twice by A; the second call is not a cycle
    let cat = catalog(&[
        ("a.sql", "CREATE PROC dbo.A AS\nEXEC dbo.B\nEXEC dbo.B"),
        ("b.sql", "CREATE PROC dbo.B AS SELECT 1"),
    ]);

    assert_eq!(
        tree(&cat, "A"),
        vec!["[dbo].[A]", "|\t[dbo].[B]", "|\t[dbo].[B]"]
    );
}

#[test]
fn test_mutual_recursion() {
    let cat = catalog(&[
        ("ping.sql", "CREATE PROC dbo.Ping AS IF @@NESTLEVEL < 5 EXEC dbo.Pong"),
        ("pong.sql", "CREATE PROC dbo.Pong AS EXEC dbo.Ping"),
    ]);

    assert_eq!(
        tree(&cat, "Ping"),
        vec![
            "[dbo].[Ping]",
            "|\t[dbo].[Pong]",
            "|\t|\t[dbo].[Ping]",
            "|\t|\t|\t[dbo].[Pong]...",
        ]
    );
}

#[test]
fn test_schema_qualified_children() {
    let cat = catalog(&[
        (
            "run.sql",
            "CREATE PROC dbo.RunNightly AS\nEXEC etl.Extract\nEXEC [etl].[Transform]\nEXEC Load",
        ),
        ("extract.sql", "CREATE PROC etl.Extract AS SELECT 1"),
        ("transform.sql", "CREATE PROC etl.Transform AS SELECT 1"),
        ("load.sql", "CREATE PROC dbo.Load AS SELECT 1"),
    ]);

    assert_eq!(
        tree(&cat, "RunNightly"),
        vec![
            "[dbo].[RunNightly]",
            "|\t[etl].[Extract]",
            "|\t[etl].[Transform]",
            "|\t[dbo].[Load]",
        ]
    );
}

#[test]
fn test_printer_streams_to_sink() {
    let cat = catalog(&[
        ("a.sql", "CREATE PROC dbo.A AS EXEC dbo.B"),
        ("b.sql", "CREATE PROC dbo.B AS SELECT 1"),
    ]);
    let start = cat.lookup("A", "dbo").unwrap().unwrap();

    let mut out = String::new();
    let written = TreePrinter::new(&cat, TreeStyle::default(), |line: &str| {
        out.push_str(line);
        out.push('\n');
    })
    .print(start)
    .unwrap();

    assert_eq!(written, 2);
    assert_eq!(out, "[dbo].[A]\n|\t[dbo].[B]\n");
}
