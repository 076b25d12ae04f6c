use std::fs;
use std::path::Path;

fn main() {
    generate_build_info();
}

fn generate_build_info() {
    // Read-only: .build_number is maintained by the release script.
    let build_file = Path::new(".build_number");
    let (date, build_num) = if build_file.exists() {
        let content = fs::read_to_string(build_file).unwrap_or_default();
        let parts: Vec<&str> = content.trim().split('_').collect();
        if parts.len() == 2 {
            (parts[0].to_string(), parts[1].parse::<u32>().unwrap_or(1))
        } else {
            ("unknown".to_string(), 1)
        }
    } else {
        ("unknown".to_string(), 1)
    };

    // Set environment variables for use in code
    println!("cargo:rustc-env=BUILD_DATE={}", date);
    println!("cargo:rustc-env=BUILD_NUMBER={}", build_num);
    println!("cargo:rustc-env=BUILD_INFO=build{}_{}", date, build_num);

    println!("cargo:rerun-if-changed=.build_number");
}
