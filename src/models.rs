pub mod designer;
