use itertools::Itertools;
use lintrans::{LinearTransformation, Matrix, Vector};

fn main() -> anyhow::Result<()> {
    lintrans::init_logger!();

    let vectors = [
        Vector::new([1.0, 1.0, 1.0])?,
        Vector::new([1.0, 2.0, 3.0])?,
        Vector::new([3.0, 4.0, 5.0])?,
    ];
    println!("[{}]", vectors.iter().join(", "));
    let independent = Vector::remove_redundant(&vectors)?;
    println!("[{}]", independent.iter().join(", "));

    #[rustfmt::skip]
    let system = Matrix::from_rows([
        [2.0, 8.0, 4.0, 2.0],
        [2.0, 5.0, 1.0, 5.0],
        [4.0, 10.0, -1.0, 1.0],
    ])?;
    println!("{system}\n");
    println!("{}\n", system.rref());
    match system.find_solution() {
        Some(solution) => println!("solution: {solution}"),
        None => log::info!("the system has no unique solution"),
    }

    let mirror = LinearTransformation::reflection(&Vector::new([1.0, 1.0])?)?;
    let v = Vector::new([5.0, -3.0])?;
    println!("reflecting {v} about <1, 1> gives {}", mirror.transform(&v)?);

    Ok(())
}
