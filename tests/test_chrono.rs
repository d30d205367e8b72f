use chrono::prelude::*;
use pretty_assertions::assert_eq;
use qs_encode::{Config, Encoding, Value};

fn date_time() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(9 * 3600)
        .unwrap()
        .with_ymd_and_hms(2014, 11, 28, 21, 45, 59)
        .unwrap()
}

#[test]
fn test_dates() {
    let data = Value::from([("date_time", date_time())]);
    assert_eq!(
        qs_encode::encode(&data, &Config::default()).unwrap(),
        "date_time=2014-11-28T21%3A45%3A59%2B09%3A00"
    );
}

#[test]
fn test_custom_format() {
    let data = Value::from([("day", date_time())]);

    let config = Config::new().date_time_format("%Y-%m-%d %H:%M");
    assert_eq!(config.encode(&data).unwrap(), "day=2014-11-28%2021%3A45");

    let config = config.encoding(Encoding::Rfc1738);
    assert_eq!(config.encode(&data).unwrap(), "day=2014-11-28+21%3A45");
}

#[test]
fn test_invalid_format_falls_back() {
    let data = Value::from([("d", date_time())]);
    let config = Config::from_options([("dateTimeFormat", "%Y-%")]);
    assert_eq!(
        config.encode(&data).unwrap(),
        "d=2014-11-28T21%3A45%3A59%2B09%3A00"
    );
}

#[test]
fn test_utc_and_naive() {
    let utc = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
    let naive = NaiveDate::from_ymd_opt(2020, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();

    let config = Config::new().date_time_format("%Y%m%dT%H%M%S%z");
    assert_eq!(
        config.encode(&Value::from([("utc", utc)])).unwrap(),
        "utc=20200102T030405%2B0000"
    );
    assert_eq!(
        config.encode(&Value::from([("naive", naive)])).unwrap(),
        "naive=20200102T030405%2B0000"
    );
}

#[test]
fn test_dates_in_sequences() {
    let data = Value::from([("when", vec![date_time()])]);
    let config = Config::new().date_time_format("%s");
    assert_eq!(config.encode(&data).unwrap(), "when[]=1417178759");
}
