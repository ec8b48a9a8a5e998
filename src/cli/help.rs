//! Help, about and instructions screens.

#![allow(clippy::print_stdout)]

use crate::config::Config;

const ABOUT: &str = "\
specid identifies bird species in photographs with an ONNX image classifier.

The reference model was trained on the Caltech-UCSD Birds-200-2011 dataset:

  Wah C., Branson S., Welinder P., Perona P., Belongie S. \"The Caltech-UCSD
  Birds-200-2011 Dataset.\" Computation & Neural Systems Technical Report,
  CNS-TR-2011-001.

A classifier only knows the species it was trained on; that model covers
200 species, so many birds will be unfamiliar to it. Treat its guesses as a
pointer toward the right identification rather than a final answer.

The model was never taught what \"no bird\" looks like. A photo without any
bird still gets a best guess for which bird it might be.";

const INSTRUCTIONS: &str = "\
Pass one or more photos (or directories of photos) on the command line:

  specid photo.jpg
  specid ~/Pictures/feeder --format csv --output feeder.csv

Each photo is classified and its top guess, or its top three guesses when
no single guess is confident enough, are printed next to the file name.
Species names are highlighted unless --no-bold is given.

Photos are rotated according to their EXIF orientation before they are
classified, so camera and phone pictures can be used as they are.";

/// Print help message based on configuration state.
pub fn print_smart_help(config: &Config) {
    if config.models.is_empty() {
        print_first_time_help();
    } else {
        print_configured_help();
    }
}

/// Print detailed setup guide for first-time users.
pub fn print_first_time_help() {
    println!("No models configured. Get started with specid:");
    println!();
    println!("1. Initialize configuration:");
    println!("   specid config init");
    println!();
    println!("2. Export a bird classifier to ONNX and write its species labels,");
    println!("   one per line, in the order of the model's output scores.");
    println!();
    println!("3. Add your model to configuration:");
    println!("   specid models add cub200 --path ./cub200.onnx --labels ./labels.txt --default");
    println!();
    println!("4. Identify photos:");
    println!("   specid photo.jpg");
    println!();
    println!("IMPORTANT: Models are subject to their respective licenses. You are responsible");
    println!("for ensuring your use complies with each model's license terms.");
    println!();
    println!("Run 'specid -h' for all options or 'specid instructions' for usage notes.");
}

/// Print brief usage reminder for configured users.
pub fn print_configured_help() {
    println!("Usage: specid [FILES]... [OPTIONS]");
    println!();
    println!("Example: specid feeder.jpg -m cub200 --threshold 0.6");
    println!();
    println!("Run 'specid -h' for all options or 'specid models list' to see configured models.");
}

/// Print information about the classifier.
pub fn print_about() {
    println!("{ABOUT}");
}

/// Print usage instructions.
pub fn print_instructions() {
    println!("{INSTRUCTIONS}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_cites_training_dataset() {
        assert!(ABOUT.contains("Caltech-UCSD Birds-200-2011"));
        assert!(ABOUT.contains("CNS-TR-2011-001"));
    }

    #[test]
    fn test_instructions_mention_usage() {
        assert!(INSTRUCTIONS.contains("specid photo.jpg"));
        assert!(INSTRUCTIONS.contains("--no-bold"));
    }
}
