use std::fmt::Display;

pub fn paren_expr<S>(s: S) -> String
where S: Display {
    let s = s.to_string();
    if s.contains(' ') {
        format!("({s})")
    } else {
        s
    }
}

const SUB: [char; 11] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉', '₋'];
const SUP: [char; 11] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹', '⁻'];

fn script(i: isize, table: &[char; 11]) -> String {
    i.to_string().chars().map(|c| match c.to_digit(10) {
        Some(d) => table[d as usize],
        None => table[10],
    }).collect()
}

pub fn subscript(i: isize) -> String {
    script(i, &SUB)
}

pub fn superscript(i: isize) -> String {
    script(i, &SUP)
}

/// Joins `(coeff, monomial)` strings into `a + bx - cy` form.
pub fn lc<I>(terms: I) -> String
where I: IntoIterator<Item = (String, String)> {
    let mut res = String::new();

    for (i, (r, x)) in terms.into_iter().enumerate() {
        let r = paren_expr(r);
        let (op, r) = match r.strip_prefix('-') {
            Some(r) => ("-", r.to_owned()),
            None    => ("+", r)
        };

        let term = if x == "1" {
            r
        } else if r == "1" {
            x
        } else {
            format!("{r}{x}")
        };

        if i == 0 {
            if op == "-" { res.push('-') }
        } else {
            res.push_str(&format!(" {op} "));
        }
        res.push_str(&term);
    }

    if res.is_empty() {
        res.push('0')
    }
    res
}
