use crate::expr::Formula;

/// Folds the propositional constants through every connective and removes double
/// negations. Subformulas under modalities are simplified, but a modality itself is
/// never folded away: `[i]True` stays `[i]True`.
pub fn simplify(formula: Formula) -> Formula {
    match formula {
        Formula::Not(rhs) => {
            let r = simplify(*rhs);

            match r {
                Formula::True => Formula::False,
                Formula::False => Formula::True,
                Formula::Not(rhs) => *rhs,
                e => !e
            }
        }

        Formula::And(lhs, rhs) => {
            let l = simplify(*lhs);
            if l == Formula::False {
                return l;
            }

            let r = simplify(*rhs);
            if r == Formula::False {
                return r;
            }

            if l == Formula::True {
                return r;
            }

            if r == Formula::True {
                return l;
            }

            l & r
        }

        Formula::Or(lhs, rhs) => {
            let l = simplify(*lhs);
            if l == Formula::True {
                return l;
            }

            let r = simplify(*rhs);
            if r == Formula::True {
                return r;
            }

            if l == Formula::False {
                return r;
            }

            if r == Formula::False {
                return l;
            }

            l | r
        }

        Formula::Imp(lhs, rhs) => {
            let l = simplify(*lhs);
            let r = simplify(*rhs);

            if l == Formula::False || r == Formula::True {
                return Formula::True;
            }

            if l == Formula::True {
                return r;
            }

            if r == Formula::False {
                return simplify(!l);
            }

            Formula::imp(l, r)
        }

        Formula::Iff(lhs, rhs) => {
            let l = simplify(*lhs);
            let r = simplify(*rhs);

            if l == Formula::True {
                return r;
            }

            if r == Formula::True {
                return l;
            }

            if l == Formula::False {
                return simplify(!r);
            }

            if r == Formula::False {
                return simplify(!l);
            }

            Formula::iff(l, r)
        }

        Formula::Modal(modality, rhs) => Formula::modal(modality, simplify(*rhs)),

        e => e
    }
}
