use chrono::{FixedOffset, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;

use kyusei::circular::rotate_to_last;
use kyusei::config::JiaZiConfig;
use kyusei::ninestar::jiazi::{BASE_JIA_ZI, is_jia_zi};
use kyusei::ninestar::ring::{calculate_new_ring, ring_for};
use kyusei::ninestar::stars::mod9;
use kyusei::ninestar::wuxing::compare_rings;
use kyusei::{Comparison, Config, Date, EpochMillis, Error, HalfYear, NineStarKi, Star};

fn ki() -> NineStarKi {
    NineStarKi::new(Config::default()).unwrap()
}

#[test]
fn daily_nine_star_report() {
    let day = ki().daily_nine_star("2025-02-26").unwrap();
    assert!((1..=9).contains(&day.star.get()));
    assert_eq!(4, day.name.chars().count());
    assert_eq!(Some(day.star), day.name.chars().next().and_then(Star::from_numeral));
    let reference = day.reference_jia_zi.iso_gregorian();
    assert_eq!(10, reference.len());
    assert!(
        reference
            .char_indices()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() }),
        "{reference}"
    );
    assert!(is_jia_zi(day.reference_jia_zi));
}

#[test]
fn invalid_date_is_rejected() {
    assert!(matches!(
        ki().daily_nine_star("invalid-date"),
        Err(Error::InvalidDateInput(_))
    ));
    assert!(matches!(ki().chart("2025-02-30"), Err(Error::InvalidDateInput(_))));
}

#[test]
fn input_format_invariance() {
    let ki = ki();
    let taipei = FixedOffset::east_opt(8 * 3600).unwrap();
    let zoned = taipei.with_ymd_and_hms(2025, 6, 24, 9, 30, 0).unwrap();
    let utc = Utc.with_ymd_and_hms(2025, 6, 23, 16, 0, 0).unwrap();
    let expected = ki.daily_nine_star("2025-06-24").unwrap();
    assert_eq!(expected, ki.daily_nine_star(zoned).unwrap());
    assert_eq!(expected, ki.daily_nine_star(utc).unwrap());
    assert_eq!(expected, ki.daily_nine_star(EpochMillis(utc.timestamp_millis())).unwrap());
    assert_eq!(expected, ki.daily_nine_star("2025-06-23T16:00:00Z").unwrap());
    assert_eq!(
        expected,
        ki.daily_nine_star(Date::from_gregorian(2025, 6, 24).unwrap()).unwrap()
    );
}

#[test]
fn polarity_by_half_year() {
    let ki = ki();
    let first: Vec<_> = ["2025-01-15", "2025-02-15", "2025-03-15"]
        .map(|d| ki.daily_nine_star(d).unwrap().half_year)
        .into();
    let second: Vec<_> = ["2025-07-15", "2025-08-15", "2025-09-15"]
        .map(|d| ki.daily_nine_star(d).unwrap().half_year)
        .into();
    assert_eq!(vec![HalfYear::Yang; 3], first);
    assert_eq!(vec![HalfYear::Yin; 3], second);
}

#[test]
fn day_star_walks_one_step_per_day() {
    let ki = ki();
    let start = Date::from_gregorian(2025, 1, 10).unwrap();
    for i in 0..60 {
        let today = ki.daily_nine_star(start + i).unwrap();
        let tomorrow = ki.daily_nine_star(start + i + 1).unwrap();
        assert_eq!(HalfYear::Yang, today.half_year);
        assert_eq!(mod9(i64::from(today.star.get()) + 1), tomorrow.star.get());
    }
    let start = Date::from_gregorian(2025, 7, 10).unwrap();
    for i in 0..60 {
        let today = ki.daily_nine_star(start + i).unwrap();
        let tomorrow = ki.daily_nine_star(start + i + 1).unwrap();
        assert_eq!(mod9(i64::from(today.star.get()) - 1), tomorrow.star.get());
    }
}

#[test]
fn rings_are_permutations() {
    for center in Star::ALL {
        let ring = ring_for(center);
        assert!(ring.is_permutation());
        let mut numerals = ring.numerals();
        numerals.sort_unstable_by_key(|&c| Star::from_numeral(c));
        assert_eq!(Star::ALL.map(Star::numeral), numerals);

        let base = ring_for(Star::wrap(5)).numerals();
        let shifted = calculate_new_ring(&base, 5 - i64::from(center.get())).unwrap();
        assert_eq!(ring.numerals().to_vec(), shifted);
    }
}

#[test]
fn rotate_places_target_last() {
    let seq = ring_for(Star::wrap(8)).numerals();
    for target in seq {
        let rotated = rotate_to_last(&seq, &target).unwrap();
        assert_eq!(Some(&target), rotated.last());
    }
}

#[test]
fn jia_zi_every_sixty_days() {
    let from = Date::from_gregorian(2024, 1, 1).unwrap();
    let hits: Vec<i32> = (0..365)
        .map(|i| from + i)
        .filter(|&d| is_jia_zi(d))
        .map(|d| d - BASE_JIA_ZI)
        .collect();
    assert_eq!(7, hits.len());
    assert!(hits.windows(2).all(|w| w[1] - w[0] == 60));
    assert!(hits.iter().all(|d| d % 60 == 0));
}

#[test]
fn comparator_extremes() {
    let ring = ring_for(Star::wrap(4));
    assert!(
        compare_rings(&ring, &ring, &ring)
            .iter()
            .all(|c| c.to_string().starts_with('(') && c.to_string().ends_with(')'))
    );
    // 5, 9, 1 at the south: earth, fire, water
    let labels = compare_rings(
        &ring_for(Star::wrap(1)),
        &ring_for(Star::wrap(5)),
        &ring_for(Star::wrap(6)),
    );
    assert_eq!(Comparison::AllDistinct, labels[0]);
    assert_eq!("O", labels[0].to_string());
}

#[rstest]
#[case(2020)]
#[case(2021)]
#[case(2022)]
#[case(2023)]
#[case(2024)]
#[case(2025)]
#[case(2026)]
#[case(2027)]
#[case(2028)]
#[case(2029)]
#[case(2030)]
fn risshun_is_near_february_fourth(#[case] year: i32) {
    let risshun = ki().risshun_date(year).unwrap();
    let feb4 = Date::from_gregorian(year, 2, 4).unwrap();
    assert!((risshun - feb4).abs() <= 1, "{year}: {risshun}");
}

#[test]
fn chart_json() {
    let chart = ki().chart("2025-02-26").unwrap();
    let value = serde_json::to_value(&chart).unwrap();
    assert_eq!("2025-02-26", value["date"]);
    assert_eq!(2, value["stars"]["year"]);
    assert_eq!(9, value["stars"]["day"]);
    assert_eq!("yang", value["day"]["half_year"]);
    assert_eq!("2024-12-26", value["day"]["reference_jia_zi"]);
    assert_eq!(9, value["rings"]["day"].as_array().unwrap().len());
    assert_eq!("九", value["rings"]["day"][8]);
    assert_eq!(9, value["comparison"].as_array().unwrap().len());
}

#[test]
fn default_radius_misses_2020() {
    // the 2019 winter solstice lies 29 and 31 days from its jia-zi neighbours
    assert!(matches!(
        ki().chart("2020-03-01"),
        Err(Error::AnchorSearchExhausted { radius: 14, .. })
    ));

    let config = Config {
        jiazi: JiaZiConfig { radius_days: 30 },
        ..Config::default()
    };
    let chart = NineStarKi::new(config).unwrap().chart("2020-03-01").unwrap();
    assert_eq!(HalfYear::Yang, chart.day.half_year);
    assert_eq!("2019-11-23", chart.day.reference_jia_zi.iso_gregorian());
    assert_eq!(1, chart.stars.day.get());
}
