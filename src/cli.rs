use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dubletten-check")]
#[command(about = "Deutsche Nationalbibliothek: Dublettencheck für Exceltabellen", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Ausführlichere Logs (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Nur Fehler ausgeben
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Auswertung nach exakten Werten (zeichengenauer Vergleich einer Spalte)
    Exact {
        /// Excel-Datei (xlsx)
        #[arg(required = true)]
        input: PathBuf,

        /// Zu überprüfende Spalte (ohne Angabe: Auswahl im Terminal)
        #[arg(short, long)]
        column: Option<String>,

        /// Gruppierungsspalte (Standard aus der Konfiguration: Überordnung)
        #[arg(short, long)]
        group: Option<String>,

        /// Ausgabedatei oder -verzeichnis (Standard: ./duplicates.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tabellenblatt (Standard: erstes Blatt)
        #[arg(long)]
        sheet: Option<String>,

        /// Zusammenfassung als JSON ausgeben
        #[arg(long)]
        json: bool,
    },

    /// Börsenblatt: Abgleich von Jahrgang und Erscheinungsjahr (Digicode d034)
    Year {
        /// Excel-Datei (xlsx)
        #[arg(required = true)]
        input: PathBuf,

        /// Digicode, auf den gefiltert wird (Standard: d034)
        #[arg(short, long)]
        digicode: Option<String>,

        /// Ausgabedatei oder -verzeichnis (Standard: ./duplicates_year.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tabellenblatt (Standard: erstes Blatt)
        #[arg(long)]
        sheet: Option<String>,

        /// Zusammenfassung als JSON ausgeben
        #[arg(long)]
        json: bool,
    },

    /// Spalten und Datentypen einer Excel-Datei anzeigen
    Columns {
        /// Excel-Datei (xlsx)
        #[arg(required = true)]
        input: PathBuf,

        /// Tabellenblatt (Standard: erstes Blatt)
        #[arg(long)]
        sheet: Option<String>,
    },

    /// Benötigte Felder für den Börsenblatt-Abgleich anzeigen
    Fields,

    /// Konfiguration anzeigen/zurücksetzen
    Config {
        /// Konfiguration anzeigen
        #[arg(long)]
        show: bool,

        /// Standardwerte in die Konfigurationsdatei schreiben
        #[arg(long)]
        reset: bool,
    },
}
