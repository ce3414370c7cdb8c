#![expect(missing_docs, reason = "tests")]

use std::net::Ipv4Addr;

use browser_console::test_helpers::SharedBuffer;
use browser_console::{
    BrowserConsole, Config, Context, Level, Logger, Mapping, ToMapping, Value, context, show_to,
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use regex::Regex;
use serial_test::serial;
use test_case::test_case;

fn capture(log: impl FnOnce(&mut BrowserConsole<Vec<u8>>)) -> String {
    let mut console = BrowserConsole::with_output(true, Vec::new());
    log(&mut console);
    String::from_utf8(console.into_output()).unwrap()
}

fn capture_show(message: impl Into<Value>, context: &Context, show_date: bool) -> String {
    let mut output = Vec::new();
    show_to(&mut output, message, context, show_date).unwrap();
    String::from_utf8(output).unwrap()
}

#[test_case(Level::Log)]
#[test_case(Level::Emergency)]
#[test_case(Level::Alert)]
#[test_case(Level::Critical)]
#[test_case(Level::Error)]
#[test_case(Level::Warning)]
#[test_case(Level::Notice)]
#[test_case(Level::Info)]
#[test_case(Level::Debug)]
fn valid_levels_select_the_console_method(level: Level) {
    let output = capture(|console| console.log(level.as_str(), &"x", &Context::new()).unwrap());

    assert_eq!(output, format!("\n<script>console.{level}(\"x\")</script>"));
}

#[test_case("invalid_level")]
#[test_case("INFO")]
#[test_case("warn")]
#[test_case("")]
fn unknown_levels_fall_back_to_info(level: &str) {
    let output = capture(|console| console.log(level, &"Test", &Context::new()).unwrap());

    assert_eq!(output, "\n<script>console.info(\"Test\")</script>");
}

#[test]
fn leveled_methods_forward_to_log() {
    let output = capture(|console| {
        let context = Context::new();
        console.emergency("1", &context).unwrap();
        console.alert("2", &context).unwrap();
        console.critical("3", &context).unwrap();
        console.error("4", &context).unwrap();
        console.warning("5", &context).unwrap();
        console.notice("6", &context).unwrap();
        console.info("7", &context).unwrap();
        console.debug("8", &context).unwrap();
    });

    assert_eq!(
        output,
        indoc! {r#"

            <script>console.emergency("1")</script>
            <script>console.alert("2")</script>
            <script>console.critical("3")</script>
            <script>console.error("4")</script>
            <script>console.warning("5")</script>
            <script>console.notice("6")</script>
            <script>console.info("7")</script>
            <script>console.debug("8")</script>"#}
    );
}

#[test]
fn empty_message() {
    let output = capture(|console| console.alert("", &Context::new()).unwrap());

    assert!(output.contains(r#"console.alert("")"#));
}

#[test]
fn context_interpolation() {
    let output = capture(|console| {
        console
            .info("Hello {user}", &context!(user = "Mustermann"))
            .unwrap();
        console
            .info(
                "{greeting} {name}, welcome to {place}!",
                &context!(greeting = "Hello", name = "John", place = "Earth"),
            )
            .unwrap();
    });

    assert!(output.contains(r#"console.info("Hello Mustermann")"#));
    assert!(output.contains(r#"console.info("Hello John, welcome to Earth!")"#));
}

#[test]
fn stringable_messages_and_context_values() {
    let output = capture(|console| {
        console
            .debug(Ipv4Addr::LOCALHOST, &Context::new())
            .unwrap();
        console
            .debug(
                "listening on {address}",
                &context!(address = Value::stringable(Ipv4Addr::UNSPECIFIED)),
            )
            .unwrap();
    });

    assert!(output.contains(r#"console.debug("127.0.0.1")"#));
    assert!(output.contains(r#"console.debug("listening on 0.0.0.0")"#));
}

#[test]
fn disabled_console_writes_nothing() {
    let output = capture(|console| {
        console.set_enabled(false);
        console.info("This should not appear", &Context::new()).unwrap();
        console.show("Nor this", &Context::new(), true).unwrap();
    });

    assert_eq!(output, "");
}

#[test]
fn output_is_a_script_tag() {
    let output = capture(|console| console.info("Test", &Context::new()).unwrap());

    assert!(output.starts_with("\n<script>"));
    assert!(output.ends_with("</script>"));
}

#[test]
fn unicode_is_not_escaped() {
    let output = capture(|console| console.info("Hello 世界! 🌍", &Context::new()).unwrap());

    assert!(output.contains("Hello 世界! 🌍"));
}

#[test]
fn special_characters_are_escaped() {
    let output = capture(|console| console.info(r"Line1\nLine2", &Context::new()).unwrap());

    assert!(output.contains(r#""Line1\\nLine2""#));
}

#[test]
fn show_scalars() {
    assert!(capture_show("Hello", &Context::new(), false).contains(r#"console.log("Hello")"#));
    assert!(capture_show(-100500, &Context::new(), false).contains("console.log(-100500)"));
    assert!(capture_show(1.5_f64, &Context::new(), false).contains("console.log(1.5)"));
    assert!(capture_show(true, &Context::new(), false).contains("console.log(true)"));
    assert!(capture_show(false, &Context::new(), false).contains("console.log(false)"));
    assert!(capture_show(Value::Null, &Context::new(), false).contains("console.log(null)"));
}

#[test]
fn show_keeps_structured_shapes() {
    assert!(
        capture_show(Value::from_iter([("foo", "bar")]), &Context::new(), false)
            .contains(r#"console.log({"foo":"bar"})"#)
    );

    let nested = Value::from_iter([(
        "user",
        Value::from_iter([("name", Value::from("John")), ("age", Value::from(30))]),
    )]);
    assert!(
        capture_show(nested, &Context::new(), false)
            .contains(r#"console.log({"user":{"name":"John","age":30}})"#)
    );
}

#[test]
fn show_serializable_types() {
    #[derive(serde::Serialize)]
    struct Order {
        id: u32,
        items: Vec<&'static str>,
        paid: Option<bool>,
    }

    let order = Value::from_serialize(&Order {
        id: 7,
        items: vec!["tea", "scones"],
        paid: None,
    })
    .unwrap();

    assert_eq!(
        capture_show(order, &Context::new(), false),
        r#"
<script>console.log({"id":7,"items":["tea","scones"],"paid":null})</script>"#
    );
}

#[test]
fn show_with_context() {
    let output = capture_show("Hello {user}", &context!(user = "Mustermann"), false);

    assert!(output.contains(r#"console.log("Hello Mustermann")"#));
}

#[test]
fn show_is_repeatable() {
    let value = Value::from_iter([("list", Value::from(vec![1, 2, 3]))]);

    let first = capture_show(value.clone(), &Context::new(), false);
    let second = capture_show(value, &Context::new(), false);

    assert_eq!(first, second);
}

#[test]
fn show_with_date() {
    let output = capture_show("Hello", &Context::new(), true);

    let pattern = Regex::new(
        r#"^\n<script>console\.log\("\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\] Hello"\)</script>$"#,
    )
    .unwrap();
    assert!(pattern.is_match(&output), "{output:?}");
}

#[test]
fn show_with_date_interpolates_first() {
    let output = capture_show("{a}", &context!(a = "[x]"), true);

    assert!(output.ends_with(r#"] [x]")</script>"#), "{output:?}");
}

#[test]
fn show_with_date_does_not_affect_structures() {
    let output = capture_show(Value::from_iter([("foo", "bar")]), &Context::new(), true);

    assert!(output.contains(r#"console.log({"foo":"bar"})"#));
    assert!(!output.contains("[20"));
}

#[test]
fn show_stringable_object() {
    let output = capture_show(
        Value::stringable("Stringable content"),
        &Context::new(),
        false,
    );

    assert!(output.contains(r#"console.log("Stringable content")"#));
}

#[test]
fn show_convertible_object() {
    struct Model;

    impl ToMapping for Model {
        fn to_mapping(&self) -> Mapping {
            Mapping::from_iter([
                ("id".to_owned(), Value::from(1)),
                ("name".to_owned(), Value::from("Test")),
            ])
        }
    }

    let output = capture_show(Value::convertible(Model), &Context::new(), true);

    assert!(output.contains(r#"console.log({"id":1,"name":"Test"})"#));
}

#[test]
fn show_reports_encoding_errors() {
    let mut output = Vec::new();
    let error = show_to(&mut output, f64::INFINITY, &Context::new(), false).unwrap_err();

    assert!(matches!(
        error,
        browser_console::Error::Encoding(browser_console::EncodingError::NonFiniteNumber(_))
    ));
    assert!(output.is_empty());
}

#[test]
#[serial]
fn global_logger_installs_once() {
    browser_console::init(&Config { enabled: false }).expect("no logger installed yet");

    log::info!("swallowed by the disabled console");
    assert!(browser_console::init(&Config::default()).is_err());
}

#[test]
fn shared_buffer_observes_a_moved_console() {
    let buffer = SharedBuffer::new();
    let mut console = BrowserConsole::with_output(true, buffer.clone());

    console.info("first", &Context::new()).unwrap();
    assert_eq!(buffer.take(), "\n<script>console.info(\"first\")</script>");

    console.info("second", &Context::new()).unwrap();
    assert_eq!(buffer.lines(), [r#"<script>console.info("second")</script>"#]);
}
