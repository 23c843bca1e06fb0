fn execute(dir: &str, args: &[&str]) {
    let cmd = &args[0];
    let cmd_full = args.join(" ");
    eprintln!("Running '{}'", cmd_full);
    let status = std::process::Command::new(cmd)
        .current_dir(dir)
        .args(&args[1..])
        .spawn()
        .unwrap_or_else(|_| panic!("Could not start command '{}'", cmd_full))
        .wait()
        .unwrap_or_else(|_| panic!("cmd failed: '{}'", cmd_full));

    if !status.success() {
        eprintln!("Command '{}' terminated with a non-0 exit code", cmd_full);
        std::process::exit(1);
    }
    eprintln!("Finished: '{}'", cmd_full);
}

fn demo_build() {
    execute(
        "demos/counter",
        &["cargo", "build", "--target", "wasm32-unknown-unknown"],
    );
    execute(
        "./",
        &[
            "wasm-bindgen",
            "--target",
            "web",
            "--no-typescript",
            "--out-dir",
            "demos/counter/pkg",
            "./target/wasm32-unknown-unknown/debug/tin_counter.wasm",
        ],
    )
}

fn demo_serve() {
    execute(
        "./",
        &[
            "cargo",
            "watch",
            "-w",
            "demos/counter/src",
            "-w",
            "tin/src",
            "-w",
            "tin_macros/src",
            "-s",
            "cargo xtask demo-build",
        ],
    );
}

fn main() {
    let args: Vec<_> = std::env::args().skip(1).collect();
    let arg_refs: Vec<_> = args.iter().map(|x| x.as_str()).collect();

    match arg_refs.as_slice() {
        ["demo-build"] => {
            demo_build();
        }
        ["demo-serve"] => {
            demo_serve();
        }
        _ => {
            eprintln!("Unknown arguments, expected one of: demo-build, demo-serve");
            std::process::exit(1);
        }
    }
}
