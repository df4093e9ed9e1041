mod args;

use anyhow::Result;
use fwpkg_tool::COUNTER;
use fwpkg_tool::package::device::device_limit_violations;
use fwpkg_tool::package::{Package, PackageSummary, write_package_file};
use fwpkg_tool::types::{FsLabel, PackConfig};
use fwpkg_tool::utils::files::{collect_fs_files, read_file};

pub fn pack(firmware_path: &str, fs_root: &str, output: &str, cfg: &PackConfig) -> Result<()> {
    let firmware = read_file(firmware_path)?;
    if !cfg.quiet {
        println!("Firmware: {} ({} bytes)", firmware_path, firmware.len());
    }
    let records = collect_fs_files(fs_root, cfg.order)?;
    for record in records.iter() {
        if !cfg.quiet {
            println!("Adding file: {}", record.name);
            println!("   - File Name Length: {} bytes", record.name.len());
            println!("   - File Size: {} bytes", record.content.len());
        }
        COUNTER.inc_file(record.content.len() as u64);
    }
    for violation in device_limit_violations(&records) {
        if cfg.strict {
            return Err(violation.into());
        }
        eprintln!("Warning: {}", violation);
        COUNTER.inc_warning();
    }
    let summary = write_package_file(&firmware, &records, output, cfg.atomic)?;
    let header = summary.header;
    println!();
    println!("Package '{}' created successfully!", output);
    println!("   - Firmware Size: {} bytes", header.firmware_size());
    println!("   - {} Size: {} bytes", cfg.label, header.fs_region_size());
    println!("   - Firmware Offset: {}", header.firmware_offset());
    println!("   - {} Offset: {}", cfg.label, header.fs_offset());
    println!("   - Total Size: {} bytes", summary.total_size);
    Ok(())
}

pub fn info(package_path: &str, json: bool) -> Result<()> {
    let package = Package::read_file(package_path)?;
    let header = package.header;
    if json {
        let summary = PackageSummary::new(header, &package.files);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    println!("Package: {}", package_path);
    println!("   - Firmware Size: {} bytes", header.firmware_size());
    println!("   - Filesystem Size: {} bytes", header.fs_region_size());
    println!("   - Firmware Offset: {}", header.firmware_offset());
    println!("   - Filesystem Offset: {}", header.fs_offset());
    println!("   - Files: {}", package.files.len());
    for file in package.files.iter() {
        println!("{:>12}  {}", file.content.len(), file.name);
    }
    Ok(())
}

pub fn unpack(
    package_path: &str,
    output: &str,
    label: FsLabel,
    quiet: bool,
) -> Result<()> {
    let package = Package::read_file(package_path)?;
    package.extract_to(output, label)?;
    for file in package.files.iter() {
        if !quiet {
            println!("Extracted {}/{}", label.dir_name(), file.name);
        }
        COUNTER.inc_file(file.content.len() as u64);
    }
    println!(
        "Extracted firmware ({} bytes) and {} files to {}",
        package.firmware.len(),
        package.files.len(),
        output
    );
    Ok(())
}

fn main() {
    let arg = args::parse_args();
    if arg.backtrace {
        unsafe { std::env::set_var("RUST_LIB_BACKTRACE", "1") };
    }
    let re = match &arg.command {
        Some(args::Command::Info { package, json }) => info(package, *json),
        Some(args::Command::Unpack {
            package,
            output,
            label,
        }) => unpack(package, output, *label, arg.quiet),
        None => match (&arg.firmware, &arg.fs_root, &arg.output) {
            (Some(firmware), Some(fs_root), Some(output)) => {
                pack(firmware, fs_root, output, &arg.pack_config())
            }
            _ => args::usage_error("<FIRMWARE> <FS_ROOT> <OUTPUT> are required"),
        },
    };
    let show_counter = arg.shows_counter();
    if let Err(e) = re {
        COUNTER.inc_error();
        eprintln!("Error: {:#}", e);
        if arg.backtrace {
            eprintln!("Backtrace: {}", e.backtrace());
        }
        if show_counter {
            eprintln!("{}", *COUNTER);
        }
        std::process::exit(1);
    }
    if show_counter && (COUNTER.warnings() > 0 || !arg.quiet) {
        eprintln!("{}", *COUNTER);
    }
}
