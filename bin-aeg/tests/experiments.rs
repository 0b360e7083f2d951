use itertools::Itertools;
use log::*;
use num_traits::{One, Zero};
use rand::SeedableRng;
use rand::rngs::StdRng;
use aeg_alg::{LPoly, Q};
use aeg_core::{AcceptancePolicy, Affine, Experiment, FoldOrder, GeneratorAction, RoleAssignment, Symmetric, Word};
use aeg_core::eval::{evaluate, fold_scalar};
use aeg_core::torsion::{contains_factors, cyclotomic_check, torsion, try_factor_out, verify_dual_sum};
use aeg_knot::{collect_distinct, fetch_presentation, rolfsen_names, KnotName, KnotSearch, Normalize, TwoBridgeOracle};

type P = LPoly<Q>;

fn init_logger() {
    use aeg_alg::util::log::init_simple_logger;
    init_simple_logger(log::LevelFilter::Info).ok();
}

fn w(s: &str) -> Word {
    s.parse().unwrap()
}

// run test by:
// cargo test -r -- --exact [NAME] --nocapture --include-ignored

#[test]
#[ignore]
fn links() {
    init_logger();

    let mut rng = StdRng::seed_from_u64(0);
    let policies = [
        AcceptancePolicy::Polynomial,
        AcceptancePolicy::Laurent,
        AcceptancePolicy::SimplePole(1),
    ];

    for (name, r) in [("hopf", "abAB"), ("whitehead", "abABAbab"), ("borromean", "abCBcACbcB")] {
        let x = w(r);
        let reference = cyclotomic_check(&Symmetric.variables(&x));

        for policy in policies {
            let e = Experiment::new(Symmetric, FoldOrder::Reverse, policy);
            let res = e.run(&x, &reference, &mut rng);
            println!("{name} ({policy}):\n{res}");
        }
    }
}

#[test]
#[ignore]
fn dual_sums() {
    init_logger();

    let x = w("abABaBabABaBAbAb");
    for mult in ['a', 'b'] {
        let roles = RoleAssignment::new(mult, ['a', 'b']);
        let d = verify_dual_sum(&x, &roles);
        println!("{x} ({roles}): residual = {d}");
        assert!(d.is_zero());
    }
}

#[test]
#[ignore]
fn shuffle_control() {
    init_logger();

    let x = w("abABaBabABaBAbAb");
    let a = Affine::new(RoleAssignment::new('b', ['a', 'b']));
    let mut rng = StdRng::seed_from_u64(1);

    let p = fold_scalar(&x, &a);
    let reverse = torsion(&p, &fold_scalar(&x.reversed(), &a));

    let n = 100;
    let same = (0..n).filter(|_| {
        let q = evaluate(&x, &a, FoldOrder::Shuffled, &mut rng);
        torsion(&p, &q) == reverse
    }).count();

    println!("shuffled torsion equal to reverse torsion: {same} / {n}");
    assert!(same < n);
}

#[test]
#[ignore]
fn two_bridge_alexander_filter() {
    init_logger();

    let oracle = TwoBridgeOracle::load().unwrap().with_seed(Some(0));
    let mut rng = StdRng::seed_from_u64(0);
    let mut passed = vec![];

    for name in rolfsen_names(8) {
        let mut search = KnotSearch::default();
        let Ok(res) = fetch_presentation(&oracle, &name, &mut search, Normalize::Relabel) else {
            continue
        };
        let Some(pres) = res.found() else {
            warn!("{name}: exhausted");
            continue
        };

        let a = Affine::new(pres.roles.clone());
        let p = evaluate(&pres.relator, &a, FoldOrder::Forward, &mut rng);

        for order in [FoldOrder::AThenM, FoldOrder::MThenA] {
            let q = evaluate(&pres.relator, &a, order, &mut rng);
            let r = try_factor_out(&torsion(&p, &q), &pres.alexander, AcceptancePolicy::Laurent);
            info!("{name} {order}: {}", if r.found { "found" } else { "not found" });
        }

        if contains_factors(&p, &pres.alexander) {
            passed.push(name);
        }
    }

    println!("p contains Δ: {}", passed.iter().join(", "));
}

#[test]
#[ignore]
fn distinct_presentations() {
    init_logger();

    let oracle = TwoBridgeOracle::load().unwrap().with_seed(Some(0));
    let name: KnotName = "7_4".parse().unwrap();
    let ps = collect_distinct(&oracle, &name, 50, KnotSearch::DEFAULT_MAX_ATTEMPTS, Normalize::Relabel).unwrap();

    let mut rng = StdRng::seed_from_u64(0);
    let taus = ps.iter().map(|pres| {
        let a = Affine::new(pres.roles.clone());
        let p = evaluate(&pres.relator, &a, FoldOrder::Forward, &mut rng);
        let q = evaluate(&pres.relator, &a, FoldOrder::Reverse, &mut rng);
        torsion(&p, &q)
    }).collect_vec();

    let nonzero = taus.iter().filter(|t| !t.is_zero()).count();
    println!("{name}: {} presentations, {nonzero} with non-zero torsion", ps.len());

    assert_eq!(ps.len(), 50);
    assert!(ps.iter().all(|p| p.alexander == ps[0].alexander));
    assert!(ps[0].alexander != P::one());
}
