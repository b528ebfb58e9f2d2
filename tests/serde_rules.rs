#![cfg(feature = "serde")]

use static_rules::{Context, Equals, EqualsLiteral, Rule};

fn sample() -> Rule<String> {
    Rule::from(EqualsLiteral::new("plan", Some("pro"), "pro-offer".to_owned()))
        .and(!Rule::from(Equals::new(["region", "home"], "travel".to_owned())))
        .or(EqualsLiteral::absent("trial", "no-trial".to_owned()).into())
}

#[test]
fn json_roundtrip_preserves_behaviour() {
    let rule = sample();
    let json = serde_json::to_string(&rule).unwrap();
    let restored: Rule<String> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, rule);
    assert_eq!(restored.attributes(), "pro-offer");

    let ctx = Context::new()
        .set("plan", "pro")
        .set("region", "eu")
        .set("home", "us")
        .set("trial", "yes");
    assert_eq!(restored.satisfied(&ctx), rule.satisfied(&ctx));
}

#[test]
fn composite_serializes_as_list() {
    let rule: Rule<()> = Rule::all(vec![EqualsLiteral::absent("a", ()).into()]);
    let json = serde_json::to_value(&rule).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "And": [
                { "EqualsLiteral": { "key": "a", "literal": null, "attributes": null } }
            ]
        })
    );
}

#[test]
fn empty_composite_rejected() {
    let err = serde_json::from_str::<Rule<()>>(r#"{"Or": []}"#).unwrap_err();
    assert!(
        err.to_string()
            .contains("composite rule requires at least one nested rule"),
        "unexpected error: {err}"
    );
}

#[test]
fn universal_leaf_from_json() {
    let rule: Rule<u32> =
        serde_json::from_str(r#"{"Equals": {"keys": [], "attributes": 7}}"#).unwrap();
    assert!(rule.is_universal());
    assert_eq!(*rule.attributes(), 7);
}
