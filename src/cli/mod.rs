/// Vectorizer names for the command line and config files
pub mod vectorizers;

/// Classifier names for the command line and config files
pub mod classifiers;

/// Normalization names for the command line and config files
pub mod normalization;
