//! End-to-end acceptance of valid documents

use rstest::rstest;
use serde_json::json;
use toml_reader::{read_toml, DocTree, PlainValue};

fn plain(text: &str) -> serde_json::Value {
    let outcome = read_toml(text, false);
    assert!(outcome.is_ok(), "errors in {text:?}: {:?}", outcome.errors);
    let tree = outcome.result.expect("valid reads produce a tree");
    serde_json::to_value(tree.to_plain()).expect("plain trees serialize")
}

#[test]
fn the_classic_example_document() {
    let text = r#"
# This is a TOML document.

title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
dob = 1979-05-27T07:32:00-08:00 # First class dates

[database]
server = "192.168.1.1"
ports = [ 8001, 8001, 8002 ]
connection_max = 5000
enabled = true

[servers]

  # Indentation (tabs and/or spaces) is allowed but not required
  [servers.alpha]
  ip = "10.0.0.1"
  dc = "eqdc10"

  [servers.beta]
  ip = "10.0.0.2"
  dc = "eqdc10"

[clients]
data = [ ["gamma", "delta"], [1, 2] ]

# Line breaks are OK when inside arrays
hosts = [
  "alpha",
  "omega"
]
"#;
    assert_eq!(
        plain(text),
        json!({
            "title": "TOML Example",
            "owner": {
                "name": "Tom Preston-Werner",
                "dob": "1979-05-27T07:32:00-08:00",
            },
            "database": {
                "server": "192.168.1.1",
                "ports": [8001, 8001, 8002],
                "connection_max": 5000,
                "enabled": true,
            },
            "servers": {
                "alpha": { "ip": "10.0.0.1", "dc": "eqdc10" },
                "beta": { "ip": "10.0.0.2", "dc": "eqdc10" },
            },
            "clients": {
                "data": [["gamma", "delta"], [1, 2]],
                "hosts": ["alpha", "omega"],
            },
        })
    );
}

#[test]
fn comments_everywhere() {
    let text = "# top\n[group] # header\nanswer = 42 # value\nlist = [ 1, # one\n  2 ] # two\n";
    assert_eq!(plain(text), json!({ "group": { "answer": 42, "list": [1, 2] } }));
}

#[rstest]
#[case("x = 1", json!(1))]
#[case("x = +99", json!(99))]
#[case("x = -17", json!(-17))]
#[case("x = 1_000", json!(1000))]
#[case("x = 0", json!(0))]
#[case("x = 0xFF", json!(255))]
#[case("x = 0x_FF", json!(255))]
#[case("x = 0xdead_beef", json!(0xdead_beefu32 as i64))]
#[case("x = 0b1010", json!(10))]
#[case("x = 0o17", json!(15))]
#[case("x = 0o7_5_5", json!(493))]
fn integer_forms(#[case] text: &str, #[case] expected: serde_json::Value) {
    assert_eq!(plain(text), json!({ "x": expected }));
}

#[rstest]
#[case("x = 3.14", json!(3.14))]
#[case("x = -0.01", json!(-0.01))]
#[case("x = 1e6", json!(1e6))]
#[case("x = 6.626e-34", json!(6.626e-34))]
#[case("x = 9_224_617.445_991", json!(9_224_617.445_991))]
fn float_forms(#[case] text: &str, #[case] expected: serde_json::Value) {
    assert_eq!(plain(text), json!({ "x": expected }));
}

#[test]
fn non_finite_floats() {
    let outcome = read_toml("a = inf\nb = +inf\nc = -inf\nd = nan\ne = -nan\n", false);
    assert!(outcome.is_ok(), "errors: {:?}", outcome.errors);
    let Some(DocTree::Plain(PlainValue::Table(entries))) = outcome.result else {
        panic!("expected a plain table");
    };
    let get = |key: &str| match entries.iter().find(|(k, _)| k == key) {
        Some((_, PlainValue::Float(v))) => *v,
        other => panic!("expected a float for {key}, got {other:?}"),
    };
    assert_eq!(get("a"), f64::INFINITY);
    assert_eq!(get("b"), f64::INFINITY);
    assert_eq!(get("c"), f64::NEG_INFINITY);
    assert!(get("d").is_nan());
    assert!(get("e").is_nan());
}

#[rstest]
#[case("x = 1979-05-27T07:32:00Z", "1979-05-27T07:32:00Z")]
#[case("x = 1979-05-27t07:32:00z", "1979-05-27T07:32:00Z")]
#[case("x = 1979-05-27 07:32:00", "1979-05-27T07:32:00")]
#[case("x = 1979-05-27T00:32:00.999999-07:00", "1979-05-27T00:32:00.999999-07:00")]
#[case("x = 1979-05-27", "1979-05-27")]
#[case("x = 07:32:00", "07:32:00")]
#[case("x = 00:32:00.25", "00:32:00.25")]
fn date_time_forms(#[case] text: &str, #[case] canonical: &str) {
    assert_eq!(plain(text), json!({ "x": canonical }));
}

#[test]
fn string_escapes_decode() {
    let text = r#"s = "I'm a string. \"You can quote me\". Name\tJos\u00E9\nLocation\tSF.""#;
    assert_eq!(
        plain(text),
        json!({ "s": "I'm a string. \"You can quote me\". Name\tJosé\nLocation\tSF." })
    );
}

#[test]
fn literal_strings_are_verbatim() {
    let text = "winpath = 'C:\\Users\\nodejs\\templates'\nregex = '<\\i\\c*\\s*>'\n";
    assert_eq!(
        plain(text),
        json!({ "winpath": "C:\\Users\\nodejs\\templates", "regex": "<\\i\\c*\\s*>" })
    );
}

#[test]
fn multi_line_strings() {
    let text = "a = \"\"\"\nRoses are red\nViolets are blue\"\"\"\nb = \"\"\"\\\n  The quick brown \\\n  fox.\\\n  \"\"\"\nc = '''\nThe first newline is\ntrimmed.\n'''\n";
    assert_eq!(
        plain(text),
        json!({
            "a": "Roses are red\nViolets are blue",
            "b": "The quick brown fox.",
            "c": "The first newline is\ntrimmed.\n",
        })
    );
}

#[test]
fn keys_in_all_their_forms() {
    let text = "bare_key = 1\nbare-key = 2\n1234 = 3\n\"127.0.0.1\" = 4\n\"key with space\" = 5\n'quoted \"value\"' = 6\n";
    assert_eq!(
        plain(text),
        json!({
            "bare_key": 1,
            "bare-key": 2,
            "1234": 3,
            "127.0.0.1": 4,
            "key with space": 5,
            "quoted \"value\"": 6,
        })
    );
}

#[test]
fn empty_and_nested_arrays() {
    let text = "empty = []\nnested = [[1, 2], [3]]\ntrailing = [1, 2,]\n";
    assert_eq!(
        plain(text),
        json!({ "empty": [], "nested": [[1, 2], [3]], "trailing": [1, 2] })
    );
}

#[test]
fn table_arrays_with_nested_tables() {
    let text = "[[fruit]]\nname = \"apple\"\n\n[fruit.physical]\ncolor = \"red\"\n\n[[fruit.variety]]\nname = \"red delicious\"\n\n[[fruit.variety]]\nname = \"granny smith\"\n\n[[fruit]]\nname = \"banana\"\n\n[[fruit.variety]]\nname = \"plantain\"\n";
    assert_eq!(
        plain(text),
        json!({
            "fruit": [
                {
                    "name": "apple",
                    "physical": { "color": "red" },
                    "variety": [{ "name": "red delicious" }, { "name": "granny smith" }],
                },
                {
                    "name": "banana",
                    "variety": [{ "name": "plantain" }],
                },
            ]
        })
    );
}

#[test]
fn inline_tables_nest() {
    let text = "point = { x = 1, y = { deep = true } }\nempty = {}\n";
    assert_eq!(
        plain(text),
        json!({ "point": { "x": 1, "y": { "deep": true } }, "empty": {} })
    );
}

#[test]
fn full_fidelity_leaves_keep_images() {
    let outcome = read_toml("n = 0x_FF\n", true);
    assert!(outcome.is_ok());
    let Some(DocTree::Full(node)) = outcome.result else {
        panic!("expected a full fidelity tree");
    };
    assert_eq!(
        serde_json::to_value(&node).unwrap(),
        json!({
            "kind": "table",
            "content": {
                "n": { "kind": "integer", "image": "0x_FF", "value": 255 }
            }
        })
    );
}

#[test]
fn reading_is_idempotent() {
    let text = "[a]\nx = [1, 2, 3]\n[[b]]\ny = \"z\"\n";
    let first = plain(text);
    let second = plain(text);
    assert_eq!(first, second);
}
