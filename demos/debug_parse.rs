use pest::Parser;
use unitdraw::{Rule, SceneParser};

fn main() {
    let input = std::env::args().nth(1).unwrap_or_else(|| {
        "group demo\nr 30\n\nunit square box\nfilled red\ns 2 1\n\nunit circle\nclosed blue".to_string()
    });

    println!("Parsing: {:?}", input);
    println!();

    match SceneParser::parse(Rule::document, &input) {
        Ok(pairs) => {
            println!(
                "{}",
                pest_ascii_tree::into_ascii_tree(pairs.clone()).unwrap()
            );
        }
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return;
        }
    }

    match unitdraw::parse(&input) {
        Ok(document) => match unitdraw::print(&document) {
            Ok(text) => println!("Canonical form:\n{}", text),
            Err(e) => eprintln!("{:?}", miette::Report::new(e)),
        },
        Err(e) => eprintln!("{:?}", miette::Report::new(e)),
    }
}
