//! End-to-end runs of the `lexigraph` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn lexigraph(workdir: &Path, db: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lexigraph"))
        .current_dir(workdir)
        .env_remove("RUST_LOG")
        .env_remove("LEXIGRAPH_ENV")
        .arg("--db")
        .arg(db)
        .args(args)
        .output()
        .expect("failed to run lexigraph")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn write_dumps(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("yagoMultilingualInstanceLabels.tsv"),
        "<l1>\t<Vladimir_Putin>\trdfs:label\t\"Vladimir Putin\"@eng\n\
         <l2>\t<Vladimir_Putin>\trdfs:label\t\"Путин\"@rus\n\
         <l3>\t<Moscow>\trdfs:label\t\"Moscow\"@eng\n",
    )
    .unwrap();
    fs::write(
        dir.join("yagoMultilingualClassLabels.tsv"),
        "<l4>\t<wordnet_president_110467179>\trdfs:label\t\"president\"@eng\n",
    )
    .unwrap();
    fs::write(
        dir.join("yagoTransitiveType.tsv"),
        "<t1>\t<Vladimir_Putin>\trdf:type\t<wordnet_president_110467179>\n\
         <t2>\t<Moscow>\trdf:type\t<wordnet_city_108524735>\n",
    )
    .unwrap();
    fs::write(
        dir.join("yagoTaxonomy.tsv"),
        "<t3>\t<wordnet_president_110467179>\trdfs:subClassOf\t<wordnet_person_100007846>\n",
    )
    .unwrap();
}

#[test]
fn test_ingest_build_resolve() {
    let tmp = TempDir::new().unwrap();
    let dumps = tmp.path().join("dumps");
    let db = tmp.path().join("db");
    write_dumps(&dumps);

    let ingest = lexigraph(
        tmp.path(),
        &db,
        &["ingest", dumps.to_str().unwrap(), "--lang", "eng"],
    );
    assert!(ingest.status.success(), "{:?}", ingest);
    assert!(stdout(&ingest).contains("instance labels: 3 rows: 2 parsed, 1 filtered, 0 skipped"));

    let build = lexigraph(tmp.path(), &db, &["build-index"]);
    assert!(build.status.success(), "{:?}", build);

    let resolve = lexigraph(tmp.path(), &db, &["resolve", "Moscow"]);
    assert!(resolve.status.success(), "{:?}", resolve);
    assert_eq!(stdout(&resolve), "{<Moscow>}\n");

    let compound = lexigraph(
        tmp.path(),
        &db,
        &["resolve", "putin", "vladimir", "--format", "json"],
    );
    assert_eq!(
        stdout(&compound),
        "{\"lemmas\":[\"putin\",\"vladimir\"],\"nodes\":[\"<wordnet_president_110467179>\"]}\n"
    );

    let closure = lexigraph(
        tmp.path(),
        &db,
        &["classes", "<wordnet_president_110467179>", "--mode", "closure"],
    );
    assert_eq!(
        stdout(&closure),
        "{<wordnet_person_100007846>;<wordnet_president_110467179>}\n"
    );

    let triples = tmp.path().join("triples.csv");
    fs::write(&triples, "SUBJ, moscow-NN, <NONE>, 4\n").unwrap();
    let annotate = lexigraph(
        tmp.path(),
        &db,
        &["annotate", "--input", triples.to_str().unwrap()],
    );
    assert_eq!(stdout(&annotate), "SUBJ,{<Moscow>}/moscow-NN,<NONE>,4\n");
}

#[test]
fn test_resolve_before_build_fails() {
    let tmp = TempDir::new().unwrap();
    let dumps = tmp.path().join("dumps");
    let db = tmp.path().join("db");
    write_dumps(&dumps);

    let ingest = lexigraph(tmp.path(), &db, &["ingest", dumps.to_str().unwrap()]);
    assert!(ingest.status.success(), "{:?}", ingest);

    let resolve = lexigraph(tmp.path(), &db, &["resolve", "moscow"]);
    assert_eq!(resolve.status.code(), Some(1));
    assert!(resolve.stdout.is_empty());
}

#[test]
fn test_stats_on_missing_db_fails() {
    let tmp = TempDir::new().unwrap();
    let output = lexigraph(tmp.path(), &tmp.path().join("absent"), &["stats"]);
    assert_eq!(output.status.code(), Some(1));
}
