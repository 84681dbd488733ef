mod help;
mod project;
