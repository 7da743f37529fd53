//! Heroes example.
//!
//! Builds randomized heroes with `fake` as the generator source, then shows
//! states, overrides, repetition and the catalog.
//!
//! Run with `RUST_LOG=dashing=debug cargo run --example heroes` to see the
//! builder's log output.

use dashing::*;
use fake::faker::address::en::CityName;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Hero {
    alias: String,
    real_name: String,
    city: String,
    power: u32,
    retired: bool,
}

impl FromArgs for Hero {
    fn from_args(args: &Args) -> FactoryResult<Self> {
        Ok(Hero {
            alias: args.require(0)?,
            real_name: args.require(1)?,
            city: args.require(2)?,
            power: args.value(3).unwrap_or(10),
            retired: false,
        })
    }
}

fn main() -> Result<(), FactoryError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Heroes ===\n");

    // Every instance gets a freshly generated real name and home city.
    let seed: Seed = Seed::dynamic(|_: &Capabilities| {
        let mut args = Args::new();
        args.push("The Masked One");
        args.push(format!(
            "{} {}",
            FirstName().fake::<String>(),
            LastName().fake::<String>()
        ));
        args.push(CityName().fake::<String>());
        args
    });

    let mut builder = Builder::<Hero>::of(seed);
    builder
        .register_state("legendary", args![_, _, _, 99])?
        .register_state_with("retired", args![_, _, "Pensionville"], |hero: &mut Hero, _| {
            hero.retired = true;
            None
        })?;

    // 1. Defaults
    println!("1. Default hero:");
    let hero = builder.make()?;
    println!("   {:?}\n", hero);

    // 2. Overrides
    println!("2. With an alias override:");
    let hero = builder.make_with(args!["Nightwatch"])?;
    println!("   {:?}\n", hero);

    // 3. States
    println!("3. Legendary and retired:");
    let hero = builder.apply_states(["legendary", "retired"])?.make()?;
    println!("   {:?}\n", hero);

    // 4. Repetition
    println!("4. A squad of three:");
    for hero in builder.apply_state("legendary")?.times(3).make()? {
        println!(
            "   {} ({}) from {}, power {}, retired: {}",
            hero.alias, hero.real_name, hero.city, hero.power, hero.retired
        );
    }
    println!();

    // 5. Build requests
    println!("5. Replayable request:");
    let request = BuildRequest::new()
        .state("retired")
        .overrides(args!["Old Timer"])
        .times(2);
    for hero in builder.build(&request)? {
        println!("   {} lives in {}", hero.alias, hero.city);
    }
    println!();

    // 6. Catalog with a generator shared by every builder
    println!("6. Catalog:");
    let mut generator = Capabilities::new();
    generator.set("city", CityName().fake::<String>());

    let lair_seed: Seed = Seed::dynamic(|g: &Capabilities| {
        let mut args = Args::new();
        args.push(g.get::<String>("city").unwrap_or_default());
        args
    });
    let mut catalog = Catalog::with_generator(generator);
    catalog.define(|args: &Args| args.require::<String>(0), lair_seed);

    for lair in catalog.factory::<String>().times(2).make()? {
        println!("   Lair in {}", lair);
    }
    let missing = catalog.factory::<Hero>().make()?;
    println!("   Undefined type gives {} instances", missing.len());

    Ok(())
}
