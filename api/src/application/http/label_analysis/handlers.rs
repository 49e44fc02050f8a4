pub mod analyze_label;
