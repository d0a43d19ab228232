#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("path_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use easypath_engine::geom::{Point3, Pose, Rotation, Vec3};
    use easypath_engine::path::CompiledPath;
    use easypath_engine::viz::{MarkerStyle, PathVisualizer, RecordingSink};

    const DEFAULT_STEP: f64 = 0.1;

    const USAGE: &str = r#"path_cli (easypath-engine)

USAGE:
  path_cli list
  path_cli run <scenario|all> [options]

SCENARIOS:
  straight_line
  right_angle
  zigzag
  single_point

OPTIONS (run):
  --step <f>         Progress step between printed poses (default 0.1)
  --deviation <f>    Sideways offset along each pose's right vector
  -h, --help         Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                print_scenarios();
                Ok(())
            }
            "run" => cmd_run(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn print_scenarios() {
        for scenario in Scenario::ALL {
            println!("{}", scenario.name());
        }
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let scenario_name = args.next().ok_or("missing scenario name")?;

        let mut step = DEFAULT_STEP;
        let mut deviation = 0.0;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--step" => step = args.number("--step")?,
                "--deviation" => deviation = args.number("--deviation")?,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        if scenario_name == "all" {
            for scenario in Scenario::ALL {
                run_scenario(*scenario, step, deviation)?;
            }
            return Ok(());
        }

        let scenario =
            Scenario::from_str(&scenario_name).ok_or_else(|| unknown_scenario(&scenario_name))?;
        run_scenario(scenario, step, deviation)
    }

    fn unknown_scenario(name: &str) -> String {
        let mut msg = format!("unknown scenario `{name}`\n\navailable scenarios:\n");
        for scenario in Scenario::ALL {
            msg.push_str("  ");
            msg.push_str(scenario.name());
            msg.push('\n');
        }
        msg
    }

    fn run_scenario(scenario: Scenario, step: f64, deviation: f64) -> Result<(), String> {
        let path = CompiledPath::new(&scenario.waypoints())
            .compiled()
            .map_err(|e| format!("{}: {e}", scenario.name()))?;

        let length = path.length().map_err(|e| e.to_string())?;
        let node_count = path.nodes().map_err(|e| e.to_string())?.len();
        let diagnostics = path.diagnostics().map_err(|e| e.to_string())?;

        println!("== {} ==", scenario.name());
        println!("length: {length:.6}");
        println!("nodes:  {node_count}");
        println!("diag:   {diagnostics}");
        for warning in &diagnostics.warnings {
            println!("warn:   {warning}");
        }

        let mut sink = RecordingSink::new();
        let mut viz = PathVisualizer::new(&mut sink);
        let markers = viz
            .draw(&path, MarkerStyle::default(), step)
            .map_err(|e| format!("{}: {e}", scenario.name()))?;
        println!("markers: {markers}");

        let params = CompiledPath::sample_progress(step).map_err(|e| e.to_string())?;
        for t in params {
            let pose = path
                .calculate_pose_with_deviation(t, deviation)
                .map_err(|e| e.to_string())?;
            let p = pose.position;
            let look = pose.look_vector();
            println!(
                "t={t:.4} pos=({:.4}, {:.4}, {:.4}) look=({:.4}, {:.4}, {:.4})",
                p.x, p.y, p.z, look.x, look.y, look.z
            );
        }
        println!();
        Ok(())
    }

    #[derive(Clone, Copy)]
    enum Scenario {
        StraightLine,
        RightAngle,
        Zigzag,
        SinglePoint,
    }

    impl Scenario {
        const ALL: &'static [Scenario] = &[
            Scenario::StraightLine,
            Scenario::RightAngle,
            Scenario::Zigzag,
            Scenario::SinglePoint,
        ];

        fn name(self) -> &'static str {
            match self {
                Scenario::StraightLine => "straight_line",
                Scenario::RightAngle => "right_angle",
                Scenario::Zigzag => "zigzag",
                Scenario::SinglePoint => "single_point",
            }
        }

        fn from_str(name: &str) -> Option<Self> {
            match name {
                "straight_line" => Some(Scenario::StraightLine),
                "right_angle" => Some(Scenario::RightAngle),
                "zigzag" => Some(Scenario::Zigzag),
                "single_point" => Some(Scenario::SinglePoint),
                _ => None,
            }
        }

        fn waypoints(self) -> Vec<Pose> {
            match self {
                Scenario::StraightLine => vec![
                    facing([0.0, 0.0, 0.0], Vec3::X),
                    facing([5.0, 0.0, 0.0], Vec3::X),
                    facing([10.0, 0.0, 0.0], Vec3::X),
                ],
                Scenario::RightAngle => vec![
                    facing([0.0, 0.0, 0.0], Vec3::X),
                    facing([10.0, 0.0, 10.0], Vec3::Z),
                    facing([10.0, 0.0, 20.0], Vec3::Z),
                ],
                Scenario::Zigzag => vec![
                    facing([0.0, 0.0, 0.0], Vec3::X),
                    facing([10.0, 0.0, 5.0], Vec3::new(1.0, 0.0, 1.0)),
                    facing([20.0, 0.0, 5.0], Vec3::new(1.0, 0.0, -1.0)),
                    facing([30.0, 0.0, 5.0], Vec3::new(1.0, 0.0, 1.0)),
                ],
                Scenario::SinglePoint => vec![facing([2.0, 1.0, 0.0], Vec3::X)],
            }
        }
    }

    fn facing(position: [f64; 3], dir: Vec3) -> Pose {
        Pose::new(
            Point3::from(position),
            Rotation::looking_along(dir).unwrap_or_default(),
        )
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }

        fn number(&mut self, flag: &str) -> Result<f64, String> {
            let raw = self.value(flag)?;
            raw.parse::<f64>()
                .map_err(|e| format!("invalid value `{raw}` for {flag}: {e}"))
        }
    }
}
