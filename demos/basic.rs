use static_rules::{Context, EqualsFactory, EqualsLiteralFactory, Rule, RuleFactory};

fn main() {
    // Leaves come from factories, as an outer rule-set parser would build them
    let us = EqualsLiteralFactory::value("us").new_rule(vec!["request.region".into()], "us-offer");
    let gold = EqualsLiteralFactory::value("gold").new_rule(vec!["user.tier".into()], "gold");
    let at_home = EqualsFactory.new_rule(
        vec!["request.region".into(), "user.home_region".into()],
        "home",
    );

    let rule = Rule::all(vec![us, gold, at_home]);
    println!("{rule}");

    // Cheap pre-filter: no lookups
    for (key, value) in [("request.region", Some("us")), ("request.region", Some("eu"))] {
        println!(
            "satisfiable({key} = {value:?}) -> {}",
            rule.satisfiable(key, value)
        );
    }

    // Authoritative evaluation against a context
    let ctx = Context::new()
        .set("request.region", "us")
        .set("user.tier", "gold")
        .set("user.home_region", "us");

    match rule.satisfied_detailed(&ctx) {
        Ok(report) => {
            println!("{report}");
            if report.satisfied() {
                println!("Matched: {}", rule.attributes());
            }
        }
        Err(err) => println!("Lookup failed: {err}"),
    }
}
