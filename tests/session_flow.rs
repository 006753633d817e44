//! End-to-end sessions against the fixture datasets in `testdata/`.
//!
//! Each test drives `session::run` with a scripted console and checks the
//! transcript the user would have seen.

use bikeshare::config::AppConfig;
use bikeshare::explorer::prompt::{Reply, ScriptedConsole};
use bikeshare::explorer::session;
use bikeshare::explorer::stats::{self, Popular};
use bikeshare::explorer::{City, FilterSelection, load_data};
use std::path::PathBuf;

fn config() -> AppConfig {
    AppConfig {
        data_dir: PathBuf::from("testdata"),
        ..Default::default()
    }
}

#[test]
fn test_washington_unfiltered_session() {
    let mut console = ScriptedConsole::from_lines(["washington", "all", "all", "n", "no"]);
    session::run(&mut console, &config()).expect("Session should succeed");

    let output = console.output();
    assert!(output.contains("The most popular month is: 6"), "{output}");
    // Tuesday and Wednesday tie; the lower name wins.
    assert!(output.contains("The most popular day is: Tuesday"), "{output}");
    assert!(output.contains("The most popular hour is: 8"), "{output}");

    assert!(output.contains("  Subscriber: 4"), "{output}");
    assert!(output.contains("  Customer: 2"), "{output}");
    assert!(output.contains("This city doesn't have data on gender"));
    assert!(output.contains("This city doesn't have data on users' birth years"));

    assert_eq!(output.matches("This took ").count(), 4);
    assert!(console.errors().is_empty());
    assert_eq!(console.remaining(), 0);
}

#[test]
fn test_chicago_june_monday_session() {
    let mut console = ScriptedConsole::from_lines(["Chicago", "june", "MONDAY", "n", "bye"]);
    session::run(&mut console, &config()).expect("Session should succeed");

    let output = console.output();
    assert!(!output.contains("most popular month"), "{output}");
    assert!(!output.contains("most popular day"), "{output}");
    assert!(output.contains("The most popular hour is: 8"), "{output}");
    assert!(output.contains("The most popular start station is: Streeter Dr & Grand Ave"));
    assert!(output.contains("The counts of genders are as follows:"));
}

#[test]
fn test_chicago_view_contains_only_june_mondays() {
    let selection = FilterSelection::new(
        City::Chicago,
        "june".parse().unwrap(),
        "monday".parse().unwrap(),
    );
    let view = load_data(&config(), &selection).expect("Chicago fixture loads");
    assert_eq!(view.height(), 4);

    let time = stats::time_stats(&view, &selection).unwrap();
    assert_eq!(time.month, None);
    assert_eq!(time.day, None);
    assert_eq!(time.hour, Popular(Some(8)));
}

#[test]
fn test_chicago_demographics() {
    let view = load_data(&config(), &FilterSelection::unfiltered(City::Chicago)).unwrap();
    let users = stats::user_stats(&view).unwrap();

    let years = users.birth_years.expect("Chicago has birth years");
    assert_eq!(years.earliest, Some(1972));
    assert_eq!(years.most_recent, Some(2000));
    assert_eq!(years.most_common, vec![1985, 1990]);

    let genders = users.genders.expect("Chicago has genders");
    assert_eq!(
        genders,
        vec![("Male".to_owned(), 5), ("Female".to_owned(), 3)]
    );
}

#[test]
fn test_washington_station_and_duration() {
    let view = load_data(&config(), &FilterSelection::unfiltered(City::Washington)).unwrap();

    let stations = stats::station_stats(&view).unwrap();
    assert_eq!(
        stations.trip,
        Popular(Some((
            "14th & Belmont St NW".to_owned(),
            "15th & K St NW".to_owned()
        )))
    );

    let duration = stats::trip_duration_stats(&view).unwrap();
    assert!((duration.total - 3734.366).abs() < 1e-6, "total {}", duration.total);
}

#[test]
fn test_paging_then_restart_then_exit() {
    let mut console = ScriptedConsole::from_lines([
        "new york", "all", "all", "y", "y", "n", "yes", "washington", "march", "all", "n", "n",
    ]);
    session::run(&mut console, &config()).expect("Session should succeed");

    let output = console.output();
    assert_eq!(
        output
            .matches("Hello! Let's explore some US bikeshare data!")
            .count(),
        2
    );
    assert!(output.contains("Would you like to see the rows 5 to 10 of data? Y/N"));
    // Eight dataset columns plus hour, month and day_of_week.
    assert!(output.contains("shape: (5, 11)"), "first page printed");
    assert!(output.contains("shape: (0, 11)"), "second page is past the end");
    assert_eq!(console.remaining(), 0);
}

#[test]
fn test_interrupt_at_restart_starts_over() {
    let mut console = ScriptedConsole::new([
        Reply::Line("washington".to_owned()),
        Reply::Line("all".to_owned()),
        Reply::Line("all".to_owned()),
        Reply::Line("n".to_owned()),
        Reply::Interrupted,
        Reply::Line("washington".to_owned()),
        Reply::Line("all".to_owned()),
        Reply::Line("sunday".to_owned()),
        Reply::Line("n".to_owned()),
    ]);
    session::run(&mut console, &config()).expect("Closed input ends the session cleanly");

    let output = console.output();
    assert!(output.contains("Program Interrupted...Restarting"));
    assert_eq!(output.matches("Calculating User Stats...").count(), 2);
}
