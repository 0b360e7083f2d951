use std::fmt::Display;
use log::{debug, info, warn};
use num_traits::{Zero, One, Pow};
use rand::Rng;
use aeg_alg::{factor, var_name, Factorization, LPoly, RatFunc, Q};
use crate::eval::{fold_scalar, reorder};
use crate::{Affine, FoldOrder, GeneratorAction, Role, RoleAssignment, Word};

type P = LPoly<Q>;

/// `p - q`, in canonical Laurent form.
pub fn torsion(p: &P, q: &P) -> P {
    p - q
}

/// When a quotient `τ / Δ` counts as "`Δ` factors out of `τ`".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum AcceptancePolicy {
    /// The quotient is a polynomial.
    #[default]
    Polynomial,
    /// The quotient is a Laurent polynomial.
    Laurent,
    /// The quotient is a polynomial, or its reduced denominator is exactly `tᵢ`.
    SimplePole(usize),
}

impl AcceptancePolicy {
    pub fn accepts(&self, ratio: &RatFunc) -> bool {
        match self {
            Self::Polynomial    => ratio.is_polynomial(),
            Self::Laurent       => ratio.is_laurent(),
            Self::SimplePole(i) => ratio.is_polynomial() || ratio.denom_is_var(*i),
        }
    }
}

impl Display for AcceptancePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Polynomial    => write!(f, "polynomial"),
            Self::Laurent       => write!(f, "laurent"),
            Self::SimplePole(i) => write!(f, "simple-pole({})", var_name(*i)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FactorizationReport {
    pub torsion: P,
    pub reference: P,
    pub policy: AcceptancePolicy,
    pub ratio: RatFunc,
    pub found: bool,
    /// Factorization of `ratio` if `found`, of `torsion` otherwise.
    pub factorization: Factorization,
}

/// Tries to divide `tau` by `reference`.
/// A zero `reference` never factors out.
pub fn try_factor_out(tau: &P, reference: &P, policy: AcceptancePolicy) -> FactorizationReport {
    if reference.is_zero() {
        warn!("zero reference polynomial, τ = {tau}");
        return FactorizationReport {
            torsion: tau.clone(),
            reference: P::zero(),
            policy,
            ratio: RatFunc::zero(),
            found: false,
            factorization: factor(tau),
        }
    }

    if tau.is_zero() {
        return FactorizationReport {
            torsion: P::zero(),
            reference: reference.clone(),
            policy,
            ratio: RatFunc::zero(),
            found: true,
            factorization: Factorization::zero(),
        }
    }

    let ratio = RatFunc::new(tau.clone(), reference.clone());
    let residual = ratio.to_lpoly().filter(|_| policy.accepts(&ratio));

    debug!("τ / Δ = {ratio} ({policy}: {})", residual.is_some());

    let (found, factorization) = match residual {
        Some(r) => (true, factor(&r)),
        None    => (false, factor(tau)),
    };

    FactorizationReport {
        torsion: tau.clone(),
        reference: reference.clone(),
        policy,
        ratio,
        found,
        factorization,
    }
}

impl Display for FactorizationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "torsion: {}", self.torsion)?;
        writeln!(f, "reference: {}", self.reference)?;
        writeln!(f, "torsion / reference: {}", self.ratio)?;
        if self.found {
            writeln!(f, "found ({}): residual factors {}", self.policy, self.factorization)
        } else {
            writeln!(f, "not found ({}): torsion factors {}", self.policy, self.factorization)
        }
    }
}

/// `∏ (tᵢ - 1)`
pub fn cyclotomic_check(vars: &[usize]) -> P {
    vars.iter().map(|&i| P::variable(i) - P::one()).product()
}

/// `Σ δₖ·(t^{Eₖ} - t^{-Eₖ})` over the additive symbols `k` of `word`,
/// where `δₖ = ±1` and `Eₖ` is the multiplicative exponent to the left of `k`.
pub fn dual_sum(word: &Word, roles: &RoleAssignment) -> P {
    let t = P::variable(0);
    let mut e: isize = 0;
    let mut sum = P::zero();

    for s in word.iter() {
        match roles.role(s.gen()) {
            Role::Multiplicative => e += s.exponent(),
            Role::Additive => {
                let d = t.pow(e) - t.pow(-e);
                sum += d * &Q::from(s.exponent() as i32);
            }
        }
    }
    sum
}

/// `(p - q) - dual_sum` for `q` the reverse evaluation.
/// Vanishes when `word` is balanced in the multiplicative generator.
pub fn verify_dual_sum(word: &Word, roles: &RoleAssignment) -> P {
    let a = Affine::new(roles.clone());
    let p = fold_scalar(word, &a);
    let q = fold_scalar(&word.reversed(), &a);
    torsion(&p, &q) - dual_sum(word, roles)
}

/// Every irreducible factor of `reference` occurs in `value`, up to sign,
/// with at least the same multiplicity.
pub fn contains_factors(value: &P, reference: &P) -> bool {
    if value.is_zero() {
        return false
    }
    let fv = factor(value);
    let fr = factor(reference);
    fr.factors.iter().all(|(h, m)| fv.multiplicity(h) >= *m)
}

/// Compares the forward evaluation with another fold order
/// and tries to factor a reference polynomial out of the difference.
#[derive(Clone, Debug)]
pub struct Experiment<A>
where A: GeneratorAction {
    pub action: A,
    pub compare: FoldOrder,
    pub policy: AcceptancePolicy,
}

impl<A> Experiment<A>
where A: GeneratorAction {
    pub fn new(action: A, compare: FoldOrder, policy: AcceptancePolicy) -> Self {
        Self { action, compare, policy }
    }

    pub fn run<R: Rng>(&self, word: &Word, reference: &P, rng: &mut R) -> ExperimentResult {
        info!("run: {word} ({}), compare: {}", self.action.describe(), self.compare);

        let reordered = reorder(word, self.compare, &self.action, rng);
        let p = fold_scalar(word, &self.action);
        let q = fold_scalar(&reordered, &self.action);
        let tau = torsion(&p, &q);
        let report = try_factor_out(&tau, reference, self.policy);

        info!("found: {}", report.found);

        ExperimentResult {
            word: word.clone(),
            compare: self.compare,
            reordered,
            p,
            q,
            report,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ExperimentResult {
    pub word: Word,
    pub compare: FoldOrder,
    pub reordered: Word,
    pub p: P,
    pub q: P,
    pub report: FactorizationReport,
}

impl Display for ExperimentResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "relator: {}", self.word)?;
        writeln!(f, "{} path: {}", self.compare, self.reordered)?;
        writeln!(f, "p: {}", self.p)?;
        writeln!(f, "q: {}", self.q)?;
        write!(f, "{}", self.report)
    }
}
