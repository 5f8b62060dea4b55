use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use voice_backend::{
    input_devices, output_devices, AudioEngine, AudioEvent, EngineSettings, ParameterSet,
    PresetMode, PresetRegistry,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--list" || arg == "-l") {
        print_devices()?;
        return Ok(());
    }

    let input_index: usize = args.get(1).and_then(|arg| arg.parse().ok()).unwrap_or(0);
    let output_index: usize = args.get(2).and_then(|arg| arg.parse().ok()).unwrap_or(0);

    println!("Voice Backend\n");
    print_devices()?;

    let params = Arc::new(ParameterSet::new());
    let registry = Arc::new(PresetRegistry::new());
    let (engine, event_rx) = AudioEngine::new(
        Arc::clone(&params),
        Arc::clone(&registry),
        EngineSettings::default(),
    );

    engine.set_preset(PresetMode::Clean);
    engine.start(input_index, output_index)?;
    println!(
        "\nEngine started (input {}, output {})",
        input_index, output_index
    );
    print_help();

    // Event listener thread: keeps the latest meter readings and paints them
    let _event_thread = thread::spawn(move || {
        let mut event_rx = event_rx;
        let mut input_rms = 0.0f32;
        let mut output_rms = 0.0f32;
        let mut output_peak = 0.0f32;
        loop {
            thread::sleep(Duration::from_millis(100));
            let mut dirty = false;
            while let Ok(event) = event_rx.pop() {
                match event {
                    AudioEvent::InputLevel(levels) => {
                        input_rms = levels.rms;
                        dirty = true;
                    }
                    AudioEvent::OutputLevel(levels) => {
                        output_rms = levels.rms;
                        output_peak = levels.peak;
                        dirty = true;
                    }
                    AudioEvent::Waveform(_) => {}
                    AudioEvent::Stopped => {
                        print!("\r\x1b[K");
                        println!("Engine stopped");
                        print!("> ");
                        io::stdout().flush().ok();
                    }
                }
            }
            if dirty {
                print!(
                    "\r\x1b[Kin {:>7.1} dB | out {:>7.1} dB (peak {:.2})  > ",
                    rms_db(input_rms),
                    rms_db(output_rms),
                    output_peak
                );
                io::stdout().flush().ok();
            }
        }
    });

    // Simple command loop
    loop {
        let mut input = String::new();
        print!("\r\x1b[K> ");
        io::stdout().flush()?;
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        } else if input == "q" || input == "quit" {
            engine.stop();
            println!("Goodbye!");
            break;
        } else if input == "h" || input == "help" {
            print_help();
        } else if input == "devices" {
            print_devices()?;
        } else if input == "presets" {
            for mode in PresetMode::ALL {
                println!("  {:?}", mode);
            }
        } else if input == "status" {
            println!(
                "running: {}, preset: {:?}, pitch: {:.2}, monitor: {}",
                engine.is_running(),
                engine.preset(),
                engine.pitch_factor(),
                engine.direct_monitor()
            );
            let settings = engine.settings();
            println!(
                "settings: {} Hz, {} ch, {} ms buffer, {} ms latency",
                settings.sample_rate, settings.channels, settings.buffer_ms, settings.latency_ms
            );
        } else if input == "stop" {
            engine.stop();
            println!("Stopped");
        } else if input == "start" {
            match engine.start(input_index, output_index) {
                Ok(()) => println!("Started"),
                Err(err) => println!("Start failed: {:#}", err),
            }
        } else if let Some(rest) = input.strip_prefix("preset ") {
            match parse_preset(rest.trim()) {
                Some(mode) => {
                    engine.set_preset(mode);
                    println!("Applied {:?} (pitch {:.2})", mode, engine.pitch_factor());
                }
                None => println!("Unknown preset: {}. Try 'presets'.", rest.trim()),
            }
        } else if let Some(rest) = input.strip_prefix("pitch ") {
            match rest.trim().parse::<f32>() {
                Ok(factor) if factor > 0.0 => {
                    engine.set_pitch_factor(factor);
                    println!("Pitch factor {:.2}", factor);
                }
                _ => println!("Usage: pitch <factor> (positive, e.g. 'pitch 0.8')"),
            }
        } else if let Some(rest) = input.strip_prefix("width ") {
            match rest.trim().parse::<f32>() {
                Ok(width) => {
                    engine.set_stereo_width(width);
                    println!("Stereo width {:.2}", width.clamp(0.0, 2.0));
                }
                Err(_) => println!("Usage: width <0.0..2.0>"),
            }
        } else if let Some(rest) = input.strip_prefix("monitor ") {
            match rest.trim() {
                "on" => {
                    engine.set_direct_monitor(true);
                    println!("Direct monitoring on");
                }
                "off" => {
                    engine.set_direct_monitor(false);
                    println!("Direct monitoring off");
                }
                _ => println!("Usage: monitor on|off"),
            }
        } else if let Some(rest) = input.strip_prefix("gain ") {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            match (parts.first(), parts.get(1).and_then(|v| v.parse::<f32>().ok())) {
                (Some(&"in"), Some(db)) => {
                    params.input_gain_db.set(db);
                    println!("Input gain {:.1} dB", db);
                }
                (Some(&"out"), Some(db)) => {
                    params.output_gain_db.set(db);
                    println!("Output gain {:.1} dB", db);
                }
                _ => println!("Usage: gain in|out <db>"),
            }
        } else if let Some(rest) = input.strip_prefix("rate ") {
            match rest.trim().parse::<u32>() {
                Ok(sample_rate) if sample_rate > 0 => {
                    let mut settings = engine.settings();
                    settings.sample_rate = sample_rate;
                    apply_settings(&engine, settings);
                }
                _ => println!("Usage: rate <hz> (e.g. 'rate 44100')"),
            }
        } else if let Some(rest) = input.strip_prefix("channels ") {
            match rest.trim().parse::<u16>() {
                Ok(channels) if (1..=2).contains(&channels) => {
                    let mut settings = engine.settings();
                    settings.channels = channels;
                    apply_settings(&engine, settings);
                }
                _ => println!("Usage: channels 1|2"),
            }
        } else if let Some(rest) = input.strip_prefix("latency ") {
            match rest.trim().parse::<u32>() {
                Ok(latency_ms) if latency_ms > 0 => {
                    let mut settings = engine.settings();
                    settings.latency_ms = latency_ms;
                    apply_settings(&engine, settings);
                }
                _ => println!("Usage: latency <ms>"),
            }
        } else if let Some(rest) = input.strip_prefix("buffer ") {
            match rest.trim().parse::<u32>() {
                Ok(buffer_ms) if buffer_ms > 0 => {
                    let mut settings = engine.settings();
                    settings.buffer_ms = buffer_ms;
                    apply_settings(&engine, settings);
                }
                _ => println!("Usage: buffer <ms>"),
            }
        } else {
            println!("Unknown command: {}. Type 'help' for commands.", input);
        }
    }

    Ok(())
}

fn apply_settings(engine: &AudioEngine, settings: EngineSettings) {
    match engine.apply_settings(settings) {
        Ok(()) => println!(
            "Settings applied: {} Hz, {} ch, {} ms buffer, {} ms latency",
            settings.sample_rate, settings.channels, settings.buffer_ms, settings.latency_ms
        ),
        Err(err) => println!("Restart failed: {:#}", err),
    }
}

fn parse_preset(name: &str) -> Option<PresetMode> {
    let lower = name.to_lowercase();
    PresetMode::ALL
        .into_iter()
        .find(|mode| format!("{:?}", mode).to_lowercase() == lower)
}

fn rms_db(rms: f32) -> f32 {
    20.0 * rms.max(1e-5).log10()
}

fn print_devices() -> anyhow::Result<()> {
    println!("Input devices:");
    for device in input_devices()? {
        println!("  {}: {}", device.index, device.name);
    }
    println!("Output devices:");
    for device in output_devices()? {
        println!("  {}: {}", device.index, device.name);
    }
    Ok(())
}

fn print_help() {
    println!("\nCommands:");
    println!("  preset <name>   - Apply a voice preset (see 'presets')");
    println!("  presets         - List voice presets");
    println!("  pitch <factor>  - Set pitch ratio (e.g. 'pitch 0.8')");
    println!("  width <w>       - Set stereo width (0.0=mono, 1.0=normal, 2.0=wide)");
    println!("  monitor on|off  - Blend the dry input into the output");
    println!("  gain in|out <db>- Input/output gain in dB");
    println!("  rate <hz>       - Sample rate (restarts a running engine)");
    println!("  channels 1|2    - Channel count (restarts)");
    println!("  buffer <ms>     - Capture buffer duration (restarts)");
    println!("  latency <ms>    - Render latency (restarts)");
    println!("  start, stop     - Transport control");
    println!("  devices         - List audio devices");
    println!("  status          - Engine state");
    println!("  h, help         - Show this help");
    println!("  q, quit         - Quit");
    println!();
}
