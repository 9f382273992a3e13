//! Accept either one item or a collection wherever peptides/alleles are taken

use crate::{Allele, Peptide};

pub trait IntoPeptides {
    fn into_peptides(self) -> Vec<Peptide>;
}

pub trait IntoAlleles {
    fn into_alleles(self) -> Vec<Allele>;
}

impl IntoPeptides for Peptide {
    fn into_peptides(self) -> Vec<Peptide> {
        vec![self]
    }
}

impl IntoPeptides for &Peptide {
    fn into_peptides(self) -> Vec<Peptide> {
        vec![self.clone()]
    }
}

impl IntoPeptides for Vec<Peptide> {
    fn into_peptides(self) -> Vec<Peptide> {
        self
    }
}

impl IntoPeptides for &[Peptide] {
    fn into_peptides(self) -> Vec<Peptide> {
        self.to_vec()
    }
}

impl IntoPeptides for &Vec<Peptide> {
    fn into_peptides(self) -> Vec<Peptide> {
        self.clone()
    }
}

impl<const N: usize> IntoPeptides for [Peptide; N] {
    fn into_peptides(self) -> Vec<Peptide> {
        self.into()
    }
}

impl IntoAlleles for Allele {
    fn into_alleles(self) -> Vec<Allele> {
        vec![self]
    }
}

impl IntoAlleles for &Allele {
    fn into_alleles(self) -> Vec<Allele> {
        vec![self.clone()]
    }
}

impl IntoAlleles for Vec<Allele> {
    fn into_alleles(self) -> Vec<Allele> {
        self
    }
}

impl IntoAlleles for &[Allele] {
    fn into_alleles(self) -> Vec<Allele> {
        self.to_vec()
    }
}

impl IntoAlleles for &Vec<Allele> {
    fn into_alleles(self) -> Vec<Allele> {
        self.clone()
    }
}

impl<const N: usize> IntoAlleles for [Allele; N] {
    fn into_alleles(self) -> Vec<Allele> {
        self.into()
    }
}
