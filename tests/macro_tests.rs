use typed_ini::{ini, to_string, Error, OptionValue, Value, ValueKind};

#[test]
fn test_ini_macro_empty() {
    let config = ini! {}.unwrap();
    assert!(config.is_empty());
    assert_eq!(to_string(&config).unwrap(), "");
}

#[test]
fn test_ini_macro_sections_keep_order() {
    let config = ini! {
        "zeta" => {},
        "alpha" => { "x" => 1 },
        "mid" => {},
    }
    .unwrap();

    let names: Vec<_> = config.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_ini_macro_values() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();
    let owner = String::from("ops");

    let config = ini! {
        "job" => {
            "enabled" => true,
            "retries" => 3u64,
            "offset" => -2,
            "ratio" => 0.75,
            "owner" => owner.clone(),
            "started" => date,
            "level" => Value::enumeration("info"),
            "tags" => ["nightly", "db"],
        }
    }
    .unwrap();

    assert!(config.get_value::<bool>("job", "enabled").unwrap());
    assert_eq!(config.get_value::<u64>("job", "retries").unwrap(), 3);
    assert_eq!(config.get_value::<i64>("job", "offset").unwrap(), -2);
    assert_eq!(config.get_value::<f64>("job", "ratio").unwrap(), 0.75);
    assert_eq!(config.get_value::<String>("job", "owner").unwrap(), owner);
    assert_eq!(
        config.get_value::<chrono::NaiveDateTime>("job", "started").unwrap(),
        date
    );
    assert_eq!(
        config.option("job", "level").unwrap().kind(),
        ValueKind::Enum
    );
    assert_eq!(
        config.option("job", "tags").unwrap().value(),
        &OptionValue::List(vec![Value::from("nightly"), Value::from("db")])
    );
}

#[test]
fn test_ini_macro_output() {
    let config = ini! {
        "net" => {
            "hosts" => ["a", "b"],
            "empty" => [],
            "note" => "semi; colon",
        }
    }
    .unwrap();

    assert_eq!(
        to_string(&config).unwrap(),
        "[net]\nhosts = a, b\nempty =\nnote = semi\\; colon\n"
    );
}

#[test]
fn test_ini_macro_rejects_bad_input() {
    assert!(matches!(
        ini! { "s" => { "bad=name" => 1 } },
        Err(Error::Validation { .. })
    ));
    assert!(matches!(
        ini! { "s" => { "x" => 1, "x" => 1 } },
        Err(Error::Ambiguity(_))
    ));
    assert!(matches!(
        ini! { "s" => { "mixed" => [1u64, 2i64] } },
        Err(Error::Type(_))
    ));
}
