use std::fs::File;
use std::io::{stdout, Write};
use std::str::FromStr;

use clap::ArgMatches;
use itertools::Itertools;
use tracing::warn;

use rectflip::dual::tikz::TikzOptions;
use rectflip::flip::random_walk::{walk_with, WalkOptions};
use rectflip::graph::validation::validate;
use rectflip::{compute_rel, find_flip_cycles, flip, Graph, GraphErr, GraphResult, RectangularDual};

fn read_graph(matches: &ArgMatches) -> Option<Graph> {
    let input_filename = matches.value_of("FILE")?;
    match Graph::read_json_file(input_filename) {
        Ok(g) => Some(g),
        Err(e) => {
            println!("Input file '{}' could not be read: {}", input_filename, e);
            None
        }
    }
}

fn report(result: GraphResult<()>) {
    if let Err(e) = result {
        match e.offending_vertices() {
            [] => println!("{}", e),
            vs => println!("{}\noffending vertices: {}", e, vs.iter().join(" ")),
        }
    }
}

/// Passes the output file named by '-o' or STDOUT to 'emit'.
fn with_output<F>(matches: &ArgMatches, emit: F) -> GraphResult<()>
where
    F: FnOnce(&mut dyn Write) -> GraphResult<()>,
{
    if let Some(output_filename) = matches.value_of("output") {
        let mut output_file = File::create(output_filename)?;
        emit(&mut output_file)?;
        output_file.flush()?;
    } else {
        let out = stdout();
        let mut lock = out.lock();
        emit(&mut lock)?;
        lock.flush()?;
    }
    Ok(())
}

fn labeled(matches: &ArgMatches) -> Option<Graph> {
    let mut g = read_graph(matches)?;
    if !g.has_rel() {
        if let Err(e) = compute_rel(&mut g) {
            report(Err(e));
            return None;
        }
    }
    Some(g)
}

pub fn check(matches: &ArgMatches) {
    if let Some(g) = read_graph(matches) {
        match validate(&g) {
            Ok(()) => println!(
                "'{}' is a properly triangulated planar graph ({} vertices, {} edges)",
                g.name,
                g.vertex_count(),
                g.edge_count()
            ),
            Err(e) => report(Err(e)),
        }
    }
}

pub fn dual(matches: &ArgMatches) {
    let mut g = match labeled(matches) {
        Some(g) => g,
        None => return,
    };

    report(RectangularDual::compute(&mut g).and_then(|dual| {
        if let Err(e) = dual.check_tiling() {
            warn!("rectangles do not tile the grid: {}", e);
        }
        with_output(matches, |w| match matches.value_of("format").unwrap_or("text") {
            "tikz" => {
                let title = format!("{}: {} x {}", g.name, dual.xmax, dual.ymax);
                let opts = TikzOptions {
                    print_document: !matches.is_present("bare"),
                    print_labels: !matches.is_present("no-labels"),
                    title: Some(&title),
                    ..TikzOptions::default()
                };
                Ok(dual.write_tikz(w, &opts)?)
            }
            "json" => g.write_json(w),
            _ => Ok(w.write_all(dual.to_table().as_bytes())?),
        })
    }));
}

pub fn flips(matches: &ArgMatches) {
    if let Some(g) = labeled(matches) {
        report(find_flip_cycles(&g).map(|cycles| {
            println!("{} flip cycles", cycles.len());
            for (i, c) in cycles.iter().enumerate() {
                println!("{:>4}  {}", i, c);
            }
        }));
    }
}

pub fn flip_cycle(matches: &ArgMatches) {
    let index = match matches.value_of("INDEX").map(usize::from_str) {
        Some(Ok(index)) => index,
        _ => {
            println!("INDEX must be a non-negative integer.");
            return;
        }
    };
    let mut g = match labeled(matches) {
        Some(g) => g,
        None => return,
    };

    report(find_flip_cycles(&g).and_then(|cycles| {
        let cycle = cycles
            .get(index)
            .ok_or_else(|| GraphErr::malformed(format!("there are only {} flip cycles", cycles.len())))?;
        let changed = flip(&mut g, cycle)?;
        println!("flipped {}, {} edges relabeled", cycle, changed.len());
        with_output(matches, |w| g.write_json(w))
    }));
}

pub fn walk(matches: &ArgMatches) {
    let mut options = WalkOptions::default();
    if let Some(steps) = matches.value_of("steps") {
        match usize::from_str(steps) {
            Ok(steps) => options.steps = steps,
            Err(_) => {
                println!("Number of steps must be a non-negative integer.");
                return;
            }
        }
    }
    if let Some(seed) = matches.value_of("seed") {
        match u64::from_str(seed) {
            Ok(seed) => options.seed = Some(seed),
            Err(_) => {
                println!("Seed must be a non-negative integer.");
                return;
            }
        }
    }

    let mut g = match labeled(matches) {
        Some(g) => g,
        None => return,
    };

    report(walk_with(&mut g, &options).and_then(|steps| {
        for s in steps.iter() {
            println!(
                "{:>5}  {:<40} of {:>4}  grid {} x {}",
                s.step,
                s.cycle.to_string(),
                s.available,
                s.xmax,
                s.ymax
            );
        }
        if matches.is_present("output") {
            with_output(matches, |w| g.write_json(w))?;
        }
        Ok(())
    }));
}
