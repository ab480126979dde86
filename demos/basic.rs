//! Declares a few mapped structs and exercises equality, the text format,
//! the serde adapter and the registry.
//!
//! Run with `RUST_LOG=trace` to see the library logs.

use memberwise::mapping::derive::Mapped;
use memberwise::mapping::registry::MappingRegistry;
use memberwise::mapping::serde::MappedSerialize;
use memberwise::mapping::{MappedExt, mapped_eq, text};

#[derive(Mapped)]
#[mapping(type_name = "FOO")]
struct Foo {
    one: i32,
    two: &'static str,
    three: char,
}

#[derive(Mapped, Default, Debug)]
#[mapping(partial_eq, auto_register, default)]
struct Bar {
    one: i32,
    two: String,
    #[mapping(skip)]
    ignore_me: String,
}

static MY_VAR: Foo = Foo {
    one: 1,
    two: "abc",
    three: '-',
};

fn main() {
    env_logger::init();

    println!("{}", text::serialize(&MY_VAR));

    let a = Bar {
        one: 1,
        two: "abc".into(),
        ignore_me: "Extra notes".into(),
    };
    let b = Bar {
        one: 1,
        two: "abc".into(),
        ignore_me: "Extra notes do not participate in equality check.".into(),
    };
    log::info!(
        "a == b: {} (notes differ: `{}` vs `{}`)",
        mapped_eq(&a, &b),
        a.ignore_me,
        b.ignore_me,
    );
    assert_eq!(a, b);

    let text = a.serialize_mapped();
    match Bar::deserialize_mapped(&text) {
        Ok(parsed) => log::info!("parsed back: {parsed:?}"),
        Err(err) => log::error!("cannot parse `{text}`: {err}"),
    }

    if let Err(err) = Bar::deserialize_mapped("{\n\ttwo : abc,\n\tone : 1\n}") {
        log::info!("reordered input is rejected: {err}");
    }

    match serde_json::to_string(&MappedSerialize(&MY_VAR)) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("serde_json failed: {err}"),
    }

    let mut registry = MappingRegistry::new();
    if !registry.auto_register() {
        registry.register_default::<Bar>();
    }
    registry.register::<Foo>();

    for meta in registry.iter() {
        log::info!("registered `{}` with fields {:?}", meta.type_name(), meta.field_names());
    }

    match registry.deserialize_boxed("Bar", &text) {
        Ok(value) => log::info!("registry round trip: {:?}", registry.serialize_any(value.as_ref())),
        Err(err) => log::error!("registry failed: {err}"),
    }
}
