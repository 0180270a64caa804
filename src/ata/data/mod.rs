/*!
Parsers for the fixed-layout structures that ATA commands return.
*/

pub mod id;
