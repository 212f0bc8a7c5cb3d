use crate::cli::PairArgs;
use crate::error::{CliError, Result};
use symeig::core::linalg::sym2::{EigenvaluePair, Sym2};
use tracing::{debug, info};

pub fn run(args: PairArgs) -> Result<()> {
    let pair = solve(&args)?;
    println!("rt1 = {}", pair.rt1);
    println!("rt2 = {}", pair.rt2);
    Ok(())
}

fn solve(args: &PairArgs) -> Result<EigenvaluePair> {
    for (name, value) in [("A", args.a), ("B", args.b), ("C", args.c)] {
        if !value.is_finite() {
            return Err(CliError::Argument(format!(
                "entry {} must be finite, got {}",
                name, value
            )));
        }
    }

    let matrix = Sym2::new(args.a, args.b, args.c);
    debug!(
        trace = matrix.trace(),
        determinant = matrix.determinant(),
        "Solving [[{}, {}], [{}, {}]].",
        args.a,
        args.b,
        args.b,
        args.c
    );
    let pair = matrix.eigenvalues();
    info!("Eigenvalues: rt1 = {}, rt2 = {}", pair.rt1, pair.rt2);
    Ok(if args.sorted {
        pair.sorted_descending()
    } else {
        pair
    })
}
